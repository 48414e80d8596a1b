//! Stable counting sort.

use serde::Serialize;

use super::{check_array, SortStep};
use crate::catalog::Algorithm;
use crate::error::{VizError, VizResult};
use crate::input::MAX_COUNTING_KEY;
use crate::trace::{TraceBuilder, TraceGenerator};

/// A key tagged with its position in the input, so stability is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Keyed {
    /// Sort key.
    pub key: u32,
    /// Index in the original input.
    pub origin: usize,
}

/// Counting sort snapshot state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountingState {
    /// Input keys (never modified).
    pub input: Vec<u32>,
    /// Count array indexed by key; after accumulation, one past the last
    /// output slot for that key.
    pub counts: Vec<usize>,
    /// Output slots filled so far.
    pub output: Vec<Option<Keyed>>,
    /// Input index being processed.
    pub input_index: Option<usize>,
    /// Count index being updated.
    pub count_index: Option<usize>,
    /// Output index just written.
    pub output_index: Option<usize>,
}

/// Counting sort over small non-negative keys.
///
/// Placement walks the input from the back, so equal keys keep their
/// relative order.
#[derive(Debug, Clone, Copy, Default)]
pub struct CountingSort;

struct Tally<'a> {
    input: &'a [u32],
    counts: Vec<usize>,
    output: Vec<Option<Keyed>>,
}

impl Tally<'_> {
    fn state(&self, input: Option<usize>, count: Option<usize>, output: Option<usize>) -> CountingState {
        CountingState {
            input: self.input.to_vec(),
            counts: self.counts.clone(),
            output: self.output.clone(),
            input_index: input,
            count_index: count,
            output_index: output,
        }
    }
}

impl TraceGenerator for CountingSort {
    type Input = [u32];
    type Kind = SortStep;
    type State = CountingState;

    fn algorithm(&self) -> Algorithm {
        Algorithm::CountingSort
    }

    fn record(&self, keys: &[u32], out: &mut TraceBuilder<SortStep, CountingState>) -> VizResult<()> {
        check_array(keys)?;
        if let Some(bad) = keys.iter().find(|k| **k > MAX_COUNTING_KEY) {
            return Err(VizError::input(
                "values",
                format!("key {bad} exceeds the maximum of {MAX_COUNTING_KEY}"),
            ));
        }
        let max = keys.iter().copied().max().unwrap_or(0) as usize;
        let mut tally = Tally {
            input: keys,
            counts: vec![0; max + 1],
            output: vec![None; keys.len()],
        };
        out.emit(
            SortStep::Initialize,
            format!("Counting sort on {} keys, largest key {max}", keys.len()),
            tally.state(None, None, None),
        )?;

        for (i, &key) in keys.iter().enumerate() {
            let k = key as usize;
            tally.counts[k] += 1;
            out.emit(
                SortStep::Count,
                format!("Count key {key}: count[{key}] = {}", tally.counts[k]),
                tally.state(Some(i), Some(k), None),
            )?;
        }

        for k in 1..=max {
            tally.counts[k] += tally.counts[k - 1];
            out.emit(
                SortStep::Accumulate,
                format!("count[{k}] += count[{}] gives {}", k - 1, tally.counts[k]),
                tally.state(None, Some(k), None),
            )?;
        }

        for (i, &key) in keys.iter().enumerate().rev() {
            let k = key as usize;
            tally.counts[k] -= 1;
            let slot = tally.counts[k];
            tally.output[slot] = Some(Keyed { key, origin: i });
            out.emit(
                SortStep::Write,
                format!("Place {key} (input index {i}) at output index {slot}"),
                tally.state(Some(i), Some(k), Some(slot)),
            )?;
        }

        let sorted: Vec<u32> = tally.output.iter().flatten().map(|k| k.key).collect();
        out.emit(
            SortStep::Complete,
            format!("Sorted: {sorted:?}"),
            tally.state(None, None, None),
        )
    }
}
