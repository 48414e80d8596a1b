//! Append-only trace accumulator handed to generators.

use tracing::trace;

use super::{Snapshot, StepKind, Trace};
use crate::error::{VizError, VizResult};

/// Default snapshot budget for a single generator run.
///
/// The largest bundled inputs (a 9x9 Sudoku, eight queens, 200-element
/// quadratic sorts) stay well under it.
pub const DEFAULT_MAX_SNAPSHOTS: usize = 100_000;

/// Explicit emit sink for generators.
///
/// Recursive generators take `&mut TraceBuilder` instead of pushing into a
/// shared list, which keeps the recursion free of any other shared state.
///
/// The builder enforces trace framing as it goes: the first snapshot must be
/// an initial kind, nothing may follow a terminal kind, and at most `limit`
/// snapshots are accepted.
#[derive(Debug)]
pub struct TraceBuilder<K, S> {
    snapshots: Vec<Snapshot<K, S>>,
    limit: usize,
    closed: bool,
}

impl<K: StepKind, S> Default for TraceBuilder<K, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: StepKind, S> TraceBuilder<K, S> {
    /// Create a builder with [`DEFAULT_MAX_SNAPSHOTS`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_MAX_SNAPSHOTS)
    }

    /// Create a builder accepting at most `limit` snapshots.
    #[must_use]
    pub fn with_limit(limit: usize) -> Self {
        Self {
            snapshots: Vec::new(),
            limit,
            closed: false,
        }
    }

    /// Append one snapshot.
    ///
    /// # Errors
    ///
    /// - [`VizError::TraceLimit`] when the snapshot budget is exhausted
    /// - [`VizError::MalformedTrace`] when the framing rules are broken
    pub fn emit(&mut self, kind: K, narration: impl Into<String>, state: S) -> VizResult<()> {
        if self.closed {
            return Err(VizError::malformed(format!(
                "'{}' emitted after the terminal snapshot",
                kind.label()
            )));
        }
        if self.snapshots.is_empty() && !kind.is_initial() {
            return Err(VizError::malformed(format!(
                "trace must open with an initial kind, got '{}'",
                kind.label()
            )));
        }
        if self.snapshots.len() >= self.limit {
            return Err(VizError::TraceLimit { limit: self.limit });
        }
        let snapshot = Snapshot::new(kind, narration, state);
        trace!(index = self.snapshots.len(), kind = kind.label(), "emit");
        self.closed = kind.is_terminal();
        self.snapshots.push(snapshot);
        Ok(())
    }

    /// Number of snapshots emitted so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Whether nothing has been emitted yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Whether a terminal snapshot has been emitted.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    /// Freeze into a read-only trace.
    ///
    /// # Errors
    ///
    /// - [`VizError::EmptyTrace`] if nothing was emitted
    /// - [`VizError::MalformedTrace`] if no terminal snapshot was emitted
    pub fn finish(self) -> VizResult<Trace<K, S>> {
        if self.snapshots.is_empty() {
            return Err(VizError::EmptyTrace);
        }
        if !self.closed {
            return Err(VizError::malformed("trace ended without a terminal snapshot"));
        }
        Trace::from_snapshots(self.snapshots)
    }
}
