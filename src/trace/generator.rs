//! Trace generator trait.
//!
//! Every algorithm in [`crate::algorithms`] implements [`TraceGenerator`].
//! This trait ensures:
//! - Batch generation (the algorithm runs to completion before returning)
//! - Determinism (same input, same trace)
//! - Renderer independence (states are plain serializable values)

use serde::Serialize;
use std::fmt::Debug;
use tracing::debug;

use super::{ErasedTrace, StepKind, Trace, TraceBuilder, DEFAULT_MAX_SNAPSHOTS};
use crate::catalog::Algorithm;
use crate::error::VizResult;

/// A pure function from validated input to a replayable trace.
///
/// # Example
///
/// ```
/// use algoviz::algorithms::sorting::SelectionSort;
/// use algoviz::trace::TraceGenerator;
///
/// let trace = SelectionSort.generate(&[3, 1, 2]).unwrap();
/// assert_eq!(trace.last().unwrap().state().array, vec![1, 2, 3]);
/// ```
pub trait TraceGenerator {
    /// Validated input consumed by reference (never mutated).
    type Input: ?Sized;

    /// Transition tags emitted by this generator.
    type Kind: StepKind + Serialize;

    /// Snapshot state type.
    type State: Clone + PartialEq + Debug + Serialize;

    /// Catalog entry for this generator.
    fn algorithm(&self) -> Algorithm;

    /// Run the algorithm, emitting every learner-visible transition.
    ///
    /// # Errors
    ///
    /// Returns an error if the input breaks the validation contract or the
    /// builder rejects a snapshot.
    fn record(
        &self,
        input: &Self::Input,
        out: &mut TraceBuilder<Self::Kind, Self::State>,
    ) -> VizResult<()>;

    /// Generate the full trace with the default snapshot budget.
    ///
    /// # Errors
    ///
    /// See [`TraceGenerator::record`].
    fn generate(&self, input: &Self::Input) -> VizResult<Trace<Self::Kind, Self::State>> {
        self.generate_with_limit(input, DEFAULT_MAX_SNAPSHOTS)
    }

    /// Generate the full trace with an explicit snapshot budget.
    ///
    /// # Errors
    ///
    /// See [`TraceGenerator::record`]; additionally fails if the trace has no
    /// terminal snapshot.
    fn generate_with_limit(
        &self,
        input: &Self::Input,
        limit: usize,
    ) -> VizResult<Trace<Self::Kind, Self::State>> {
        let mut builder = TraceBuilder::with_limit(limit);
        self.record(input, &mut builder)?;
        let trace = builder.finish()?;
        debug!(
            algorithm = self.algorithm().id(),
            steps = trace.len(),
            outcome = trace.outcome().map(StepKind::label),
            "trace generated"
        );
        Ok(trace)
    }

    /// Generate and erase to a JSON-state trace.
    ///
    /// # Errors
    ///
    /// See [`TraceGenerator::generate_with_limit`] and [`Trace::erase`].
    fn generate_erased(&self, input: &Self::Input, limit: usize) -> VizResult<ErasedTrace> {
        self.generate_with_limit(input, limit)?.erase()
    }
}
