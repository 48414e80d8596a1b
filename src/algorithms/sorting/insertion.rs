//! Insertion sort.

use std::cmp::Ordering;

use super::{check_array, Out, SortState, SortStep, Tape};
use crate::catalog::Algorithm;
use crate::error::VizResult;
use crate::trace::TraceGenerator;

/// Insertion sort with adjacent swaps, so each move is visible.
#[derive(Debug, Clone, Copy, Default)]
pub struct InsertionSort;

impl TraceGenerator for InsertionSort {
    type Input = [i64];
    type Kind = SortStep;
    type State = SortState;

    fn algorithm(&self) -> Algorithm {
        Algorithm::InsertionSort
    }

    fn record(&self, values: &[i64], out: &mut Out) -> VizResult<()> {
        check_array(values)?;
        let mut tape = Tape::new(values);
        tape.begin(out, "Insertion sort")?;

        for i in 1..tape.len() {
            tape.marker = Some(i);
            let mut j = i;
            while j > 0 && tape.compare(out, j - 1, j)? == Ordering::Greater {
                tape.swap(out, j - 1, j)?;
                j -= 1;
            }
            tape.range = Some((0, i));
        }
        tape.complete(out)
    }
}
