//! Huffman coding.

use serde::{Deserialize, Serialize};

use crate::algorithms::step_kind;
use crate::catalog::Algorithm;
use crate::error::VizResult;
use crate::input;
use crate::trace::{TraceBuilder, TraceGenerator};

/// Transition kinds for Huffman traces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HuffmanStep {
    /// Input text shown.
    Initialize,
    /// Frequency of one symbol established.
    Count,
    /// Two lowest-weight nodes combined.
    Merge,
    /// A leaf receives its code.
    AssignCode,
    /// One input character replaced by its code.
    Encode,
    /// Encoding finished.
    Complete,
}

step_kind!(HuffmanStep {
    Initialize => "initialize",
    Count => "count",
    Merge => "merge",
    AssignCode => "assign_code",
    Encode => "encode",
    Complete => "complete",
}
initial: [Initialize]
terminal: [Complete]);

/// Node in the coding tree arena. Leaves carry a symbol, internal nodes carry
/// their `(left, right)` children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HuffNode {
    /// Total frequency below this node.
    pub weight: usize,
    /// Symbol of a leaf.
    pub symbol: Option<char>,
    /// Children of an internal node, as arena indices.
    pub children: Option<(usize, usize)>,
}

/// Code of one symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeEntry {
    /// Symbol.
    pub symbol: char,
    /// Bit string, `0` for left and `1` for right.
    pub code: String,
}

/// Huffman snapshot state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HuffmanState {
    /// Tree arena; the first nodes are the leaves in order of first
    /// appearance, merged nodes follow in creation order.
    pub nodes: Vec<HuffNode>,
    /// Arena indices still in the priority queue.
    pub queue: Vec<usize>,
    /// Codes assigned so far.
    pub codes: Vec<CodeEntry>,
    /// Encoded output so far.
    pub encoded: String,
    /// Node or input position in focus.
    pub active: Option<usize>,
}

/// Huffman coding of a text.
///
/// The queue is a linear scan over `(weight, creation order)`, so ties go to
/// the older node, and the first node extracted becomes the left child. A
/// text with a single distinct symbol gets the code `0`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Huffman;

#[derive(Default)]
struct Coder {
    nodes: Vec<HuffNode>,
    queue: Vec<usize>,
    codes: Vec<CodeEntry>,
    encoded: String,
}

impl Coder {
    fn state(&self, active: Option<usize>) -> HuffmanState {
        HuffmanState {
            nodes: self.nodes.clone(),
            queue: self.queue.clone(),
            codes: self.codes.clone(),
            encoded: self.encoded.clone(),
            active,
        }
    }

    /// Remove and return the lightest queued node; older nodes win ties.
    fn extract_min(&mut self) -> Option<usize> {
        let (pos, _) = self
            .queue
            .iter()
            .enumerate()
            .min_by_key(|&(_, &id)| (self.nodes[id].weight, id))?;
        Some(self.queue.remove(pos))
    }

    fn code_of(&self, symbol: char) -> &str {
        self.codes
            .iter()
            .find(|c| c.symbol == symbol)
            .map_or("", |c| c.code.as_str())
    }
}

type Out = TraceBuilder<HuffmanStep, HuffmanState>;

/// Preorder walk assigning codes, left child first.
fn assign(coder: &mut Coder, out: &mut Out, node: usize, prefix: String) -> VizResult<()> {
    match (coder.nodes[node].symbol, coder.nodes[node].children) {
        (Some(symbol), _) => {
            let code = if prefix.is_empty() { "0".to_string() } else { prefix };
            let narration = format!("'{symbol}' (weight {}) gets code {code}", coder.nodes[node].weight);
            coder.codes.push(CodeEntry { symbol, code });
            out.emit(HuffmanStep::AssignCode, narration, coder.state(Some(node)))
        }
        (None, Some((left, right))) => {
            assign(coder, out, left, format!("{prefix}0"))?;
            assign(coder, out, right, format!("{prefix}1"))
        }
        (None, None) => Ok(()),
    }
}

impl TraceGenerator for Huffman {
    type Input = str;
    type Kind = HuffmanStep;
    type State = HuffmanState;

    fn algorithm(&self) -> Algorithm {
        Algorithm::Huffman
    }

    fn record(&self, text: &str, out: &mut Out) -> VizResult<()> {
        input::check_text("text", text)?;
        let mut coder = Coder::default();
        out.emit(
            HuffmanStep::Initialize,
            format!("Build a Huffman code for \"{text}\""),
            coder.state(None),
        )?;

        let mut order: Vec<char> = Vec::new();
        for c in text.chars() {
            if !order.contains(&c) {
                order.push(c);
            }
        }
        for &symbol in &order {
            let weight = text.chars().filter(|c| *c == symbol).count();
            coder.nodes.push(HuffNode {
                weight,
                symbol: Some(symbol),
                children: None,
            });
            let id = coder.nodes.len() - 1;
            coder.queue.push(id);
            out.emit(
                HuffmanStep::Count,
                format!("'{symbol}' appears {weight} time(s)"),
                coder.state(Some(id)),
            )?;
        }

        while coder.queue.len() > 1 {
            let (Some(left), Some(right)) = (coder.extract_min(), coder.extract_min()) else {
                break;
            };
            let weight = coder.nodes[left].weight + coder.nodes[right].weight;
            coder.nodes.push(HuffNode {
                weight,
                symbol: None,
                children: Some((left, right)),
            });
            let id = coder.nodes.len() - 1;
            coder.queue.push(id);
            out.emit(
                HuffmanStep::Merge,
                format!(
                    "Merge weights {} and {} into a node of weight {weight}",
                    coder.nodes[left].weight, coder.nodes[right].weight
                ),
                coder.state(Some(id)),
            )?;
        }

        if let Some(&root) = coder.queue.first() {
            assign(&mut coder, out, root, String::new())?;
        }

        for (i, c) in text.chars().enumerate() {
            let code = coder.code_of(c).to_string();
            coder.encoded.push_str(&code);
            out.emit(
                HuffmanStep::Encode,
                format!("Encode '{c}' as {code}"),
                coder.state(Some(i)),
            )?;
        }

        let chars = text.chars().count();
        let bits = coder.encoded.len();
        out.emit(
            HuffmanStep::Complete,
            format!(
                "Encoded {chars} characters in {bits} bits ({} bits at 8 bits per character)",
                chars * 8
            ),
            coder.state(None),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(state: &HuffmanState) -> Vec<(char, &str)> {
        state.codes.iter().map(|c| (c.symbol, c.code.as_str())).collect()
    }

    /// Walk the tree bit by bit to recover the text.
    fn decode(state: &HuffmanState) -> String {
        let root = state.nodes.len() - 1;
        let mut out = String::new();
        let mut node = root;
        for bit in state.encoded.chars() {
            if let Some((left, right)) = state.nodes[node].children {
                node = if bit == '0' { left } else { right };
            }
            if let Some(symbol) = state.nodes[node].symbol {
                out.push(symbol);
                node = root;
            }
        }
        out
    }

    #[test]
    fn test_huffman_abracadabra() {
        let trace = Huffman.generate("abracadabra").expect("generate");
        let last = trace.last().expect("non-empty").state();
        assert_eq!(
            codes(last),
            [('a', "0"), ('c', "100"), ('d', "101"), ('b', "110"), ('r', "111")]
        );
        assert_eq!(last.encoded.len(), 23);
        assert_eq!(trace.count(HuffmanStep::Merge), 4);
        assert_eq!(trace.count(HuffmanStep::Count), 5);
        assert_eq!(decode(last), "abracadabra");
        assert!(trace.validate().is_ok());
    }

    #[test]
    fn test_huffman_first_merge_takes_oldest_ties() {
        let trace = Huffman.generate("abracadabra").expect("generate");
        let merge = trace
            .iter()
            .find(|s| *s.kind() == HuffmanStep::Merge)
            .expect("merge");
        let node = merge.state().nodes.last().expect("merged node");
        // c (index 3) and d (index 4) are the lightest leaves.
        assert_eq!(node.children, Some((3, 4)));
        assert_eq!(node.weight, 2);
    }

    #[test]
    fn test_huffman_single_symbol() {
        let trace = Huffman.generate("aaaa").expect("generate");
        let last = trace.last().expect("non-empty").state();
        assert_eq!(codes(last), [('a', "0")]);
        assert_eq!(last.encoded, "0000");
        assert_eq!(trace.count(HuffmanStep::Merge), 0);
    }

    #[test]
    fn test_huffman_rejects_empty() {
        assert!(Huffman.generate("").is_err());
    }
}
