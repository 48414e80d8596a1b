//! Top-down merge sort.

use super::{check_array, Out, SortState, SortStep, Tape};
use crate::catalog::Algorithm;
use crate::error::VizResult;
use crate::trace::TraceGenerator;

/// Recursive top-down merge sort.
///
/// Merging takes from the left run on ties, which keeps the sort stable.
/// Each placement is a `write` snapshot into the working array.
#[derive(Debug, Clone, Copy, Default)]
pub struct MergeSort;

fn sort(tape: &mut Tape, out: &mut Out, lo: usize, hi: usize) -> VizResult<()> {
    if lo >= hi {
        return Ok(());
    }
    let mid = lo + (hi - lo) / 2;
    sort(tape, out, lo, mid)?;
    sort(tape, out, mid + 1, hi)?;
    merge(tape, out, lo, mid, hi)
}

fn merge(tape: &mut Tape, out: &mut Out, lo: usize, mid: usize, hi: usize) -> VizResult<()> {
    tape.range = Some((lo, hi));
    let left = tape.array[lo..=mid].to_vec();
    let right = tape.array[mid + 1..=hi].to_vec();
    let (mut i, mut j) = (0, 0);
    for k in lo..=hi {
        let take_left = if i < left.len() && j < right.len() {
            tape.compare_values(out, left[i], right[j])?.is_le()
        } else {
            i < left.len()
        };
        let (value, side) = if take_left {
            i += 1;
            (left[i - 1], "left")
        } else {
            j += 1;
            (right[j - 1], "right")
        };
        tape.write(
            out,
            k,
            value,
            format!("Write {value} from the {side} run to index {k}"),
        )?;
    }
    if lo == 0 && hi + 1 == tape.len() {
        tape.range = None;
    }
    Ok(())
}

impl TraceGenerator for MergeSort {
    type Input = [i64];
    type Kind = SortStep;
    type State = SortState;

    fn algorithm(&self) -> Algorithm {
        Algorithm::MergeSort
    }

    fn record(&self, values: &[i64], out: &mut Out) -> VizResult<()> {
        check_array(values)?;
        let mut tape = Tape::new(values);
        tape.begin(out, "Merge sort")?;
        let hi = tape.len() - 1;
        sort(&mut tape, out, 0, hi)?;
        tape.complete(out)
    }
}
