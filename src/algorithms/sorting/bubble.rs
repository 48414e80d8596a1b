//! Bubble sort with early exit.

use std::cmp::Ordering;

use super::{check_array, Out, SortState, SortStep, Tape};
use crate::catalog::Algorithm;
use crate::error::VizResult;
use crate::trace::TraceGenerator;

/// Bubble sort; stops after a pass with no swaps.
#[derive(Debug, Clone, Copy, Default)]
pub struct BubbleSort;

impl TraceGenerator for BubbleSort {
    type Input = [i64];
    type Kind = SortStep;
    type State = SortState;

    fn algorithm(&self) -> Algorithm {
        Algorithm::BubbleSort
    }

    fn record(&self, values: &[i64], out: &mut Out) -> VizResult<()> {
        check_array(values)?;
        let mut tape = Tape::new(values);
        tape.begin(out, "Bubble sort")?;

        let n = tape.len();
        for pass in 0..n.saturating_sub(1) {
            let end = n - 1 - pass;
            let mut swapped = false;
            for j in 0..end {
                if tape.compare(out, j, j + 1)? == Ordering::Greater {
                    tape.swap(out, j, j + 1)?;
                    swapped = true;
                }
            }
            if !swapped {
                tape.settle(out, 0..=end, format!("Pass {} made no swaps, the array is sorted", pass + 1))?;
                return tape.complete(out);
            }
            tape.settle(
                out,
                [end],
                format!("{} has bubbled up to index {end}", tape.array[end]),
            )?;
        }
        tape.complete(out)
    }
}
