//! Snapshot and trace data contract.
//!
//! A [`Trace`] is the complete, ordered list of [`Snapshot`]s recorded by one
//! run of a [`TraceGenerator`]. Traces are built append-only through a
//! [`TraceBuilder`] and are read-only afterwards: the snapshots live behind an
//! `Arc<[_]>` and are only ever handed out by shared reference, so `trace[i]`
//! stays identical for the lifetime of the trace no matter how many players or
//! renderers hold it.

mod builder;
mod generator;

pub use builder::{TraceBuilder, DEFAULT_MAX_SNAPSHOTS};
pub use generator::TraceGenerator;

use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::fmt::Debug;
use std::ops::Index;
use std::sync::Arc;

use crate::error::{VizError, VizResult};

/// Transition tag carried by every snapshot.
///
/// Each algorithm family defines a closed enum implementing this trait.
pub trait StepKind: Copy + Eq + Debug {
    /// Stable `snake_case` label, used for narration tests and serialization.
    fn label(self) -> &'static str;

    /// Whether this kind may open a trace.
    fn is_initial(self) -> bool;

    /// Whether this kind closes a trace (`complete` or a failure outcome).
    fn is_terminal(self) -> bool;
}

/// One immutable description of algorithm state at an instant.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Snapshot<K, S> {
    kind: K,
    narration: String,
    state: S,
}

impl<K, S> Snapshot<K, S> {
    /// Create a snapshot. The state is moved in, so it can never alias the
    /// generator's working buffers.
    pub fn new(kind: K, narration: impl Into<String>, state: S) -> Self {
        Self {
            kind,
            narration: narration.into(),
            state,
        }
    }

    /// Transition tag.
    pub const fn kind(&self) -> &K {
        &self.kind
    }

    /// Human-readable description of what just happened.
    pub fn narration(&self) -> &str {
        &self.narration
    }

    /// Algorithm-specific state value.
    pub const fn state(&self) -> &S {
        &self.state
    }
}

/// Ordered, finite, read-only sequence of snapshots.
#[derive(Debug)]
pub struct Trace<K, S> {
    snapshots: Arc<[Snapshot<K, S>]>,
}

impl<K, S> Clone for Trace<K, S> {
    fn clone(&self) -> Self {
        Self {
            snapshots: Arc::clone(&self.snapshots),
        }
    }
}

impl<K: PartialEq, S: PartialEq> PartialEq for Trace<K, S> {
    fn eq(&self, other: &Self) -> bool {
        self.snapshots == other.snapshots
    }
}

impl<K, S> Trace<K, S> {
    /// Build a trace from already-captured snapshots.
    ///
    /// # Errors
    ///
    /// Returns [`VizError::EmptyTrace`] if `snapshots` is empty.
    pub fn from_snapshots(snapshots: Vec<Snapshot<K, S>>) -> VizResult<Self> {
        if snapshots.is_empty() {
            return Err(VizError::EmptyTrace);
        }
        Ok(Self {
            snapshots: snapshots.into(),
        })
    }

    /// Number of snapshots (always at least one).
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Always `false`; kept for API symmetry with slices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Snapshot at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Snapshot<K, S>> {
        self.snapshots.get(index)
    }

    /// First snapshot.
    #[must_use]
    pub fn first(&self) -> Option<&Snapshot<K, S>> {
        self.snapshots.first()
    }

    /// Last snapshot.
    #[must_use]
    pub fn last(&self) -> Option<&Snapshot<K, S>> {
        self.snapshots.last()
    }

    /// Index of the last snapshot.
    #[must_use]
    pub fn last_index(&self) -> usize {
        self.snapshots.len().saturating_sub(1)
    }

    /// Iterate over snapshots in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Snapshot<K, S>> {
        self.snapshots.iter()
    }

    /// All snapshots as a slice.
    #[must_use]
    pub fn snapshots(&self) -> &[Snapshot<K, S>] {
        &self.snapshots
    }

    /// Whether two handles share the same underlying snapshots.
    #[must_use]
    pub fn same_trace(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.snapshots, &other.snapshots)
    }
}

impl<K: StepKind, S> Trace<K, S> {
    /// Number of snapshots of the given kind.
    #[must_use]
    pub fn count(&self, kind: K) -> usize {
        self.iter().filter(|s| *s.kind() == kind).count()
    }

    /// Kind of the final snapshot.
    #[must_use]
    pub fn outcome(&self) -> Option<K> {
        self.last().map(|s| *s.kind())
    }

    /// Check that the trace opens with an initial kind, closes with exactly one
    /// terminal kind, and has at least two snapshots.
    ///
    /// # Errors
    ///
    /// Returns [`VizError::MalformedTrace`] describing the first violation.
    pub fn validate(&self) -> VizResult<()> {
        if self.len() < 2 {
            return Err(VizError::malformed(format!(
                "expected at least 2 snapshots, found {}",
                self.len()
            )));
        }
        if let Some(first) = self.first() {
            if !first.kind().is_initial() {
                return Err(VizError::malformed(format!(
                    "first snapshot is '{}', expected an initial kind",
                    first.kind().label()
                )));
            }
        }
        let terminal_count = self.iter().filter(|s| s.kind().is_terminal()).count();
        match self.last() {
            Some(last) if last.kind().is_terminal() && terminal_count == 1 => Ok(()),
            Some(last) if !last.kind().is_terminal() => Err(VizError::malformed(format!(
                "last snapshot is '{}', expected a terminal kind",
                last.kind().label()
            ))),
            _ => Err(VizError::malformed(format!(
                "expected exactly one terminal snapshot, found {terminal_count}"
            ))),
        }
    }
}

impl<K: StepKind, S: serde::Serialize> Trace<K, S> {
    /// Convert into a type-erased trace whose states are JSON values.
    ///
    /// # Errors
    ///
    /// Returns [`VizError::Serialization`] if a state cannot be serialized.
    pub fn erase(&self) -> VizResult<ErasedTrace> {
        let snapshots = self
            .iter()
            .map(|s| {
                Ok(Snapshot::new(
                    ErasedKind::of(*s.kind()),
                    s.narration(),
                    serde_json::to_value(s.state())?,
                ))
            })
            .collect::<VizResult<Vec<_>>>()?;
        Trace::from_snapshots(snapshots)
    }
}

impl<K, S> Index<usize> for Trace<K, S> {
    type Output = Snapshot<K, S>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.snapshots[index]
    }
}

impl<'a, K, S> IntoIterator for &'a Trace<K, S> {
    type Item = &'a Snapshot<K, S>;
    type IntoIter = std::slice::Iter<'a, Snapshot<K, S>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: serde::Serialize, S: serde::Serialize> Serialize for Trace<K, S> {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for snapshot in self.iter() {
            seq.serialize_element(snapshot)?;
        }
        seq.end()
    }
}

/// Step kind with the algorithm-specific enum erased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErasedKind {
    label: &'static str,
    initial: bool,
    terminal: bool,
}

impl ErasedKind {
    /// Erase a concrete kind.
    pub fn of<K: StepKind>(kind: K) -> Self {
        Self {
            label: kind.label(),
            initial: kind.is_initial(),
            terminal: kind.is_terminal(),
        }
    }
}

impl StepKind for ErasedKind {
    fn label(self) -> &'static str {
        self.label
    }

    fn is_initial(self) -> bool {
        self.initial
    }

    fn is_terminal(self) -> bool {
        self.terminal
    }
}

impl Serialize for ErasedKind {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        serializer.serialize_str(self.label)
    }
}

/// Trace of any algorithm, with JSON states.
pub type ErasedTrace = Trace<ErasedKind, serde_json::Value>;

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Minimal kind used by trace and player tests.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
    #[serde(rename_all = "snake_case")]
    pub(crate) enum Tick {
        Initialize,
        Step,
        Complete,
    }

    impl StepKind for Tick {
        fn label(self) -> &'static str {
            match self {
                Self::Initialize => "initialize",
                Self::Step => "step",
                Self::Complete => "complete",
            }
        }

        fn is_initial(self) -> bool {
            self == Self::Initialize
        }

        fn is_terminal(self) -> bool {
            self == Self::Complete
        }
    }

    /// Trace of `n` snapshots: initialize, n-2 steps, complete.
    pub(crate) fn counting_trace(n: usize) -> Trace<Tick, Vec<usize>> {
        let snapshots = (0..n)
            .map(|i| {
                let kind = if i == 0 {
                    Tick::Initialize
                } else if i + 1 == n {
                    Tick::Complete
                } else {
                    Tick::Step
                };
                Snapshot::new(kind, format!("tick {i}"), (0..=i).collect())
            })
            .collect();
        Trace::from_snapshots(snapshots).expect("non-empty")
    }

    #[test]
    fn test_from_snapshots_rejects_empty() {
        let result = Trace::<Tick, ()>::from_snapshots(Vec::new());
        assert!(matches!(result, Err(VizError::EmptyTrace)));
    }

    #[test]
    fn test_index_and_accessors() {
        let trace = counting_trace(4);
        assert_eq!(trace.len(), 4);
        assert_eq!(trace.last_index(), 3);
        assert_eq!(trace[2].narration(), "tick 2");
        assert_eq!(trace[2].state(), &vec![0, 1, 2]);
        assert_eq!(trace.outcome(), Some(Tick::Complete));
        assert_eq!(trace.count(Tick::Step), 2);
    }

    #[test]
    fn test_validate_well_formed() {
        assert!(counting_trace(2).validate().is_ok());
        assert!(counting_trace(10).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_single_snapshot() {
        let trace =
            Trace::from_snapshots(vec![Snapshot::new(Tick::Initialize, "only", ())]).expect("ok");
        assert!(trace.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_missing_terminal() {
        let trace = Trace::from_snapshots(vec![
            Snapshot::new(Tick::Initialize, "a", ()),
            Snapshot::new(Tick::Step, "b", ()),
        ])
        .expect("ok");
        let err = trace.validate().unwrap_err();
        assert!(err.to_string().contains("terminal"));
    }

    #[test]
    fn test_validate_rejects_bad_opening() {
        let trace = Trace::from_snapshots(vec![
            Snapshot::new(Tick::Step, "a", ()),
            Snapshot::new(Tick::Complete, "b", ()),
        ])
        .expect("ok");
        assert!(trace.validate().is_err());
    }

    #[test]
    fn test_clone_shares_snapshots() {
        let trace = counting_trace(3);
        let other = trace.clone();
        assert!(trace.same_trace(&other));
        assert_eq!(trace, other);
        assert!(!trace.same_trace(&counting_trace(3)));
    }

    #[test]
    fn test_state_copy_does_not_alias_trace() {
        let trace = counting_trace(3);
        let mut copy = trace[1].state().clone();
        copy.push(99);
        copy[0] = 42;
        assert_eq!(trace[1].state(), &vec![0, 1]);
    }

    #[test]
    fn test_erase_keeps_labels_and_states() {
        let erased = counting_trace(3).erase().expect("serializable");
        assert_eq!(erased.len(), 3);
        assert_eq!(erased[0].kind().label(), "initialize");
        assert!(erased[2].kind().is_terminal());
        assert_eq!(erased[1].state(), &serde_json::json!([0, 1]));
        assert!(erased.validate().is_ok());
    }

    #[test]
    fn test_serialize_trace_as_sequence() {
        let json = serde_json::to_value(counting_trace(2)).expect("serialize");
        assert_eq!(json[0]["kind"], "initialize");
        assert_eq!(json[1]["narration"], "tick 1");

        let erased = serde_json::to_value(counting_trace(2).erase().expect("erase"))
            .expect("serialize");
        assert_eq!(erased[1]["kind"], "complete");
    }
}
