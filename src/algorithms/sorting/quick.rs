//! Quick sort with Lomuto partitioning.

use std::cmp::Ordering;

use super::{check_array, Out, SortState, SortStep, Tape};
use crate::catalog::Algorithm;
use crate::error::VizResult;
use crate::trace::TraceGenerator;

/// Quick sort, last element as pivot.
///
/// A swap snapshot is recorded only when two distinct slots exchange.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuickSort;

fn sort(tape: &mut Tape, out: &mut Out, lo: usize, hi: usize) -> VizResult<()> {
    if lo > hi {
        return Ok(());
    }
    if lo == hi {
        return tape.settle(out, [lo], format!("{} is alone in its range, it is in place", tape.array[lo]));
    }
    let p = partition(tape, out, lo, hi)?;
    if p > lo {
        sort(tape, out, lo, p - 1)?;
    }
    sort(tape, out, p + 1, hi)
}

fn partition(tape: &mut Tape, out: &mut Out, lo: usize, hi: usize) -> VizResult<usize> {
    tape.range = Some((lo, hi));
    tape.pivot(out, hi, format!("Partition [{lo}, {hi}] around pivot {}", tape.array[hi]))?;
    let mut i = lo;
    for j in lo..hi {
        if tape.compare(out, j, hi)? == Ordering::Less {
            if i != j {
                tape.swap(out, i, j)?;
            }
            i += 1;
        }
    }
    if i != hi {
        tape.swap(out, i, hi)?;
    }
    tape.settle(out, [i], format!("Pivot {} lands at index {i}", tape.array[i]))?;
    Ok(i)
}

impl TraceGenerator for QuickSort {
    type Input = [i64];
    type Kind = SortStep;
    type State = SortState;

    fn algorithm(&self) -> Algorithm {
        Algorithm::QuickSort
    }

    fn record(&self, values: &[i64], out: &mut Out) -> VizResult<()> {
        check_array(values)?;
        let mut tape = Tape::new(values);
        tape.begin(out, "Quick sort")?;
        let hi = tape.len() - 1;
        sort(&mut tape, out, 0, hi)?;
        tape.complete(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::sorting::tests::{assert_sorts, ORACLE};

    #[test]
    fn test_quick_sorts() {
        assert_sorts(&QuickSort, &ORACLE);
        assert_sorts(&QuickSort, &[3, 3, 3]);
        assert_sorts(&QuickSort, &[-5, 10, 0, -5]);
    }

    #[test]
    fn test_quick_first_pivot_is_last_element() {
        let trace = QuickSort.generate(&ORACLE).expect("generate");
        let pivot = trace
            .iter()
            .find(|s| *s.kind() == SortStep::Pivot)
            .expect("pivot");
        assert_eq!(pivot.state().marker, Some(9));
        assert_eq!(pivot.narration(), "Partition [0, 9] around pivot 50");
    }

    #[test]
    fn test_quick_sorted_input_never_swaps() {
        let trace = assert_sorts(&QuickSort, &[1, 2, 3, 4]);
        assert_eq!(trace.count(SortStep::Swap), 0);
        assert_eq!(trace.count(SortStep::Compare), 6);
    }
}
