//! Sorting algorithms.
//!
//! The comparison sorts share [`SortStep`] and [`SortState`] and record
//! through a common `Tape`: every comparison and every swap or write is one
//! snapshot, so the counters in the final state equal the number of
//! `compare` and `swap`/`write` snapshots in the trace.
//!
//! Counting sort and bucket sort carry their own auxiliary structures and
//! have dedicated state types.

mod bubble;
mod bucket;
mod counting;
mod insertion;
mod merge;
mod quick;
mod selection;

pub use bubble::BubbleSort;
pub use bucket::{BucketSort, BucketState};
pub use counting::{CountingSort, CountingState, Keyed};
pub use insertion::InsertionSort;
pub use merge::MergeSort;
pub use quick::QuickSort;
pub use selection::SelectionSort;

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::step_kind;
use crate::error::{VizError, VizResult};
use crate::input::MAX_ELEMENTS;
use crate::trace::TraceBuilder;

/// Transition kinds for sorting traces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortStep {
    /// Initial array.
    Initialize,
    /// Two elements are compared.
    Compare,
    /// Two elements exchange places.
    Swap,
    /// A pivot is chosen (quick sort).
    Pivot,
    /// A value is written into a slot (merge, counting, bucket).
    Write,
    /// A position reaches its final value.
    Sorted,
    /// A key is tallied (counting sort).
    Count,
    /// Counts are turned into positions (counting sort).
    Accumulate,
    /// A value is dropped into a bucket (bucket sort).
    Distribute,
    /// The array is sorted.
    Complete,
}

step_kind!(SortStep {
    Initialize => "initialize",
    Compare => "compare",
    Swap => "swap",
    Pivot => "pivot",
    Write => "write",
    Sorted => "sorted",
    Count => "count",
    Accumulate => "accumulate",
    Distribute => "distribute",
    Complete => "complete",
}
initial: [Initialize]
terminal: [Complete]);

/// Snapshot state shared by the comparison sorts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortState {
    /// Working array at capture time.
    pub array: Vec<i64>,
    /// Indices being compared.
    pub compared: Option<(usize, usize)>,
    /// Indices just swapped (equal for a self-swap).
    pub swapped: Option<(usize, usize)>,
    /// Positions holding their final value.
    pub sorted: Vec<bool>,
    /// Active subrange `[lo, hi]` (merge and quick sort).
    pub range: Option<(usize, usize)>,
    /// Highlighted index: current minimum, pivot, or written slot.
    pub marker: Option<usize>,
    /// Comparisons so far.
    pub comparisons: usize,
    /// Swaps and writes so far.
    pub swaps: usize,
}

pub(crate) type Out = TraceBuilder<SortStep, SortState>;

/// Working array plus the bookkeeping every comparison sort records.
pub(crate) struct Tape {
    pub(crate) array: Vec<i64>,
    sorted: Vec<bool>,
    pub(crate) range: Option<(usize, usize)>,
    pub(crate) marker: Option<usize>,
    comparisons: usize,
    swaps: usize,
}

impl Tape {
    pub(crate) fn new(values: &[i64]) -> Self {
        Self {
            array: values.to_vec(),
            sorted: vec![false; values.len()],
            range: None,
            marker: None,
            comparisons: 0,
            swaps: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.array.len()
    }

    fn state(&self, compared: Option<(usize, usize)>, swapped: Option<(usize, usize)>) -> SortState {
        SortState {
            array: self.array.clone(),
            compared,
            swapped,
            sorted: self.sorted.clone(),
            range: self.range,
            marker: self.marker,
            comparisons: self.comparisons,
            swaps: self.swaps,
        }
    }

    pub(crate) fn begin(&self, out: &mut Out, name: &str) -> VizResult<()> {
        out.emit(
            SortStep::Initialize,
            format!("{name} on {} elements: {:?}", self.len(), self.array),
            self.state(None, None),
        )
    }

    /// Compare `array[i]` with `array[j]` and record the comparison.
    pub(crate) fn compare(&mut self, out: &mut Out, i: usize, j: usize) -> VizResult<Ordering> {
        self.comparisons += 1;
        let (a, b) = (self.array[i], self.array[j]);
        let ordering = a.cmp(&b);
        let verdict = match ordering {
            Ordering::Less => "<",
            Ordering::Equal => "=",
            Ordering::Greater => ">",
        };
        out.emit(
            SortStep::Compare,
            format!("Compare {a} (index {i}) with {b} (index {j}): {a} {verdict} {b}"),
            self.state(Some((i, j)), None),
        )?;
        Ok(ordering)
    }

    /// Compare two values that no longer sit in the array (merge runs).
    pub(crate) fn compare_values(&mut self, out: &mut Out, a: i64, b: i64) -> VizResult<Ordering> {
        self.comparisons += 1;
        let ordering = a.cmp(&b);
        out.emit(
            SortStep::Compare,
            format!("Compare run heads {a} and {b}: take {}", if ordering.is_le() { a } else { b }),
            self.state(None, None),
        )?;
        Ok(ordering)
    }

    /// Exchange two slots; `i == j` is recorded as a no-op swap.
    pub(crate) fn swap(&mut self, out: &mut Out, i: usize, j: usize) -> VizResult<()> {
        self.swaps += 1;
        let narration = if i == j {
            format!("{} is already in place at index {i}", self.array[i])
        } else {
            self.array.swap(i, j);
            format!(
                "Swap {} and {}: indices {i} and {j}",
                self.array[j], self.array[i]
            )
        };
        out.emit(SortStep::Swap, narration, self.state(None, Some((i, j))))
    }

    /// Overwrite slot `i` with `value`.
    pub(crate) fn write(&mut self, out: &mut Out, i: usize, value: i64, narration: String) -> VizResult<()> {
        self.swaps += 1;
        self.array[i] = value;
        self.marker = Some(i);
        out.emit(SortStep::Write, narration, self.state(None, None))
    }

    pub(crate) fn pivot(&mut self, out: &mut Out, p: usize, narration: String) -> VizResult<()> {
        self.marker = Some(p);
        out.emit(SortStep::Pivot, narration, self.state(None, None))
    }

    /// Mark `indices` final and record it.
    pub(crate) fn settle(
        &mut self,
        out: &mut Out,
        indices: impl IntoIterator<Item = usize>,
        narration: String,
    ) -> VizResult<()> {
        for i in indices {
            self.sorted[i] = true;
        }
        out.emit(SortStep::Sorted, narration, self.state(None, None))
    }

    pub(crate) fn complete(mut self, out: &mut Out) -> VizResult<()> {
        self.sorted.fill(true);
        self.range = None;
        self.marker = None;
        out.emit(
            SortStep::Complete,
            format!(
                "Sorted: {:?} ({} comparisons, {} swaps)",
                self.array, self.comparisons, self.swaps
            ),
            self.state(None, None),
        )
    }
}

/// Reject arrays the visualizer cannot show.
pub(crate) fn check_array<T>(values: &[T]) -> VizResult<()> {
    if values.is_empty() {
        return Err(VizError::input("values", "at least one value is required"));
    }
    if values.len() > MAX_ELEMENTS {
        return Err(VizError::input(
            "values",
            format!("{} values given, at most {MAX_ELEMENTS} allowed", values.len()),
        ));
    }
    Ok(())
}
