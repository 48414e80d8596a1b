//! Knuth-Morris-Pratt search.

use serde::{Deserialize, Serialize};

use crate::algorithms::step_kind;
use crate::catalog::Algorithm;
use crate::error::VizResult;
use crate::input;
use crate::trace::{TraceBuilder, TraceGenerator};

/// Transition kinds for KMP traces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KmpStep {
    /// Inputs shown, nothing computed.
    Initialize,
    /// LPS construction compares two pattern characters.
    TableCompare,
    /// LPS construction falls back to a shorter border.
    TableFallback,
    /// LPS table finished.
    TableBuilt,
    /// Search compares a text character with a pattern character.
    SearchCompare,
    /// Search consults the failure table after a mismatch.
    SearchFallback,
    /// Full occurrence found.
    Match,
    /// Search finished.
    Complete,
}

step_kind!(KmpStep {
    Initialize => "initialize",
    TableCompare => "table_compare",
    TableFallback => "table_fallback",
    TableBuilt => "table_built",
    SearchCompare => "search_compare",
    SearchFallback => "search_fallback",
    Match => "match",
    Complete => "complete",
}
initial: [Initialize]
terminal: [Complete]);

/// Which half of the algorithm a snapshot belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KmpPhase {
    /// Building the longest-proper-prefix-suffix table.
    Table,
    /// Scanning the text.
    Search,
    /// Finished.
    Done,
}

/// Text and pattern for a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Haystack.
    pub text: String,
    /// Needle.
    pub pattern: String,
}

impl SearchQuery {
    /// Pair text with a pattern.
    pub fn new(text: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            pattern: pattern.into(),
        }
    }
}

/// KMP snapshot state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KmpState {
    /// Current phase.
    pub phase: KmpPhase,
    /// LPS entries computed so far.
    pub lps: Vec<Option<usize>>,
    /// Text cursor (search) or pattern cursor (table).
    pub i: usize,
    /// Pattern cursor (search) or current border length (table).
    pub j: usize,
    /// Start indices of matches found so far.
    pub matches: Vec<usize>,
    /// Character comparisons so far, both phases.
    pub comparisons: usize,
}

/// KMP with the textbook LPS recurrence.
#[derive(Debug, Clone, Copy, Default)]
pub struct Kmp;

struct Scan {
    phase: KmpPhase,
    lps: Vec<Option<usize>>,
    i: usize,
    j: usize,
    matches: Vec<usize>,
    comparisons: usize,
}

impl Scan {
    fn state(&self) -> KmpState {
        KmpState {
            phase: self.phase,
            lps: self.lps.clone(),
            i: self.i,
            j: self.j,
            matches: self.matches.clone(),
            comparisons: self.comparisons,
        }
    }

    fn lps(&self, k: usize) -> usize {
        self.lps[k].unwrap_or(0)
    }
}

impl TraceGenerator for Kmp {
    type Input = SearchQuery;
    type Kind = KmpStep;
    type State = KmpState;

    fn algorithm(&self) -> Algorithm {
        Algorithm::Kmp
    }

    fn record(&self, query: &SearchQuery, out: &mut TraceBuilder<KmpStep, KmpState>) -> VizResult<()> {
        input::check_text("text", &query.text)?;
        input::check_text("pattern", &query.pattern)?;
        let text: Vec<char> = query.text.chars().collect();
        let pattern: Vec<char> = query.pattern.chars().collect();
        let m = pattern.len();

        let mut scan = Scan {
            phase: KmpPhase::Table,
            lps: vec![None; m],
            i: 1,
            j: 0,
            matches: Vec::new(),
            comparisons: 0,
        };
        scan.lps[0] = Some(0);
        out.emit(
            KmpStep::Initialize,
            format!("Search for \"{}\" in \"{}\"; lps[0] = 0", query.pattern, query.text),
            scan.state(),
        )?;

        // Phase 1: i walks the pattern, j is the current border length.
        while scan.i < m {
            let (a, b) = (pattern[scan.i], pattern[scan.j]);
            scan.comparisons += 1;
            if a == b {
                scan.j += 1;
                scan.lps[scan.i] = Some(scan.j);
                out.emit(
                    KmpStep::TableCompare,
                    format!("pattern[{}] = '{a}' matches pattern[{}]: lps[{}] = {}", scan.i, scan.j - 1, scan.i, scan.j),
                    scan.state(),
                )?;
                scan.i += 1;
            } else if scan.j > 0 {
                out.emit(
                    KmpStep::TableCompare,
                    format!("pattern[{}] = '{a}' differs from pattern[{}] = '{b}'", scan.i, scan.j),
                    scan.state(),
                )?;
                let from = scan.j;
                scan.j = scan.lps(from - 1);
                out.emit(
                    KmpStep::TableFallback,
                    format!("Fall back: border length {from} becomes lps[{}] = {}", from - 1, scan.j),
                    scan.state(),
                )?;
            } else {
                scan.lps[scan.i] = Some(0);
                out.emit(
                    KmpStep::TableCompare,
                    format!("pattern[{}] = '{a}' differs from pattern[0] = '{b}': lps[{}] = 0", scan.i, scan.i),
                    scan.state(),
                )?;
                scan.i += 1;
            }
        }
        let table: Vec<usize> = (0..m).map(|k| scan.lps(k)).collect();
        scan.phase = KmpPhase::Search;
        scan.i = 0;
        scan.j = 0;
        out.emit(
            KmpStep::TableBuilt,
            format!("LPS table: {table:?}"),
            scan.state(),
        )?;

        // Phase 2: i walks the text, j the pattern.
        while scan.i < text.len() {
            let (t, p) = (text[scan.i], pattern[scan.j]);
            scan.comparisons += 1;
            if t == p {
                out.emit(
                    KmpStep::SearchCompare,
                    format!("text[{}] = '{t}' matches pattern[{}]", scan.i, scan.j),
                    scan.state(),
                )?;
                scan.i += 1;
                scan.j += 1;
                if scan.j == m {
                    let start = scan.i - m;
                    scan.matches.push(start);
                    scan.j = table[m - 1];
                    out.emit(
                        KmpStep::Match,
                        format!("Match at index {start}; continue with j = lps[{}] = {}", m - 1, scan.j),
                        scan.state(),
                    )?;
                }
            } else if scan.j > 0 {
                out.emit(
                    KmpStep::SearchCompare,
                    format!("text[{}] = '{t}' differs from pattern[{}] = '{p}'", scan.i, scan.j),
                    scan.state(),
                )?;
                let from = scan.j;
                scan.j = table[from - 1];
                out.emit(
                    KmpStep::SearchFallback,
                    format!("Consult lps[{}] = {}: shift the pattern, keep text index {}", from - 1, scan.j, scan.i),
                    scan.state(),
                )?;
            } else {
                out.emit(
                    KmpStep::SearchCompare,
                    format!("text[{}] = '{t}' differs from pattern[0] = '{p}', advance", scan.i),
                    scan.state(),
                )?;
                scan.i += 1;
            }
        }

        scan.phase = KmpPhase::Done;
        let narration = match scan.matches.len() {
            0 => format!("No occurrence of \"{}\" ({} comparisons)", query.pattern, scan.comparisons),
            n => format!(
                "Found {n} occurrence(s) at {:?} ({} comparisons)",
                scan.matches, scan.comparisons
            ),
        };
        out.emit(KmpStep::Complete, narration, scan.state())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str, pattern: &str) -> crate::trace::Trace<KmpStep, KmpState> {
        Kmp.generate(&SearchQuery::new(text, pattern)).expect("generate")
    }

    #[test]
    fn test_kmp_oracle() {
        let trace = run("ABABDABACDABABCABAB", "ABABCABAB");
        let built = trace
            .iter()
            .find(|s| *s.kind() == KmpStep::TableBuilt)
            .expect("table");
        let lps: Vec<usize> = built.state().lps.iter().map(|v| v.expect("filled")).collect();
        assert_eq!(lps, [0, 0, 1, 2, 0, 1, 2, 3, 4]);
        assert_eq!(built.narration(), "LPS table: [0, 0, 1, 2, 0, 1, 2, 3, 4]");

        let last = trace.last().expect("non-empty").state();
        assert_eq!(last.matches, [10]);
        assert_eq!(last.phase, KmpPhase::Done);
        assert_eq!(trace.count(KmpStep::Match), 1);
        assert!(trace.validate().is_ok());
    }

    #[test]
    fn test_kmp_overlapping_matches() {
        let trace = run("AAAA", "AA");
        assert_eq!(trace.last().expect("non-empty").state().matches, [0, 1, 2]);
    }

    #[test]
    fn test_kmp_no_match() {
        let trace = run("abc", "abd");
        assert!(trace.last().expect("non-empty").state().matches.is_empty());
        assert_eq!(trace.count(KmpStep::SearchFallback), 1);
    }

    #[test]
    fn test_kmp_pattern_longer_than_text() {
        let trace = run("ab", "abc");
        assert!(trace.last().expect("non-empty").state().matches.is_empty());
    }

    #[test]
    fn test_kmp_rejects_empty() {
        assert!(Kmp.generate(&SearchQuery::new("abc", "")).is_err());
        assert!(Kmp.generate(&SearchQuery::new("", "a")).is_err());
    }

    #[test]
    fn test_kmp_counts_every_comparison() {
        let trace = run("ABABDABACDABABCABAB", "ABABCABAB");
        let compares = trace.count(KmpStep::TableCompare) + trace.count(KmpStep::SearchCompare);
        assert_eq!(trace.last().expect("non-empty").state().comparisons, compares);
    }
}
