//! Selection sort.

use std::cmp::Ordering;

use super::{check_array, Out, SortState, SortStep, Tape};
use crate::catalog::Algorithm;
use crate::error::VizResult;
use crate::trace::TraceGenerator;

/// Selection sort.
///
/// Each of the `n - 1` passes ends with exactly one swap snapshot, including
/// a self-swap when the minimum is already in place.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionSort;

impl TraceGenerator for SelectionSort {
    type Input = [i64];
    type Kind = SortStep;
    type State = SortState;

    fn algorithm(&self) -> Algorithm {
        Algorithm::SelectionSort
    }

    fn record(&self, values: &[i64], out: &mut Out) -> VizResult<()> {
        check_array(values)?;
        let mut tape = Tape::new(values);
        tape.begin(out, "Selection sort")?;

        let n = tape.len();
        for i in 0..n.saturating_sub(1) {
            let mut min = i;
            tape.marker = Some(min);
            for j in i + 1..n {
                if tape.compare(out, j, min)? == Ordering::Less {
                    min = j;
                    tape.marker = Some(min);
                }
            }
            tape.swap(out, i, min)?;
            tape.settle(out, [i], format!("Index {i} now holds {}", tape.array[i]))?;
        }
        tape.complete(out)
    }
}
