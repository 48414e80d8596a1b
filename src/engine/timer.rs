//! Single-slot cancellable timer.
//!
//! Guarantees:
//! - At most one timer is outstanding at a time
//! - Scheduling a new timer cancels the previous one
//! - Every handle carries a unique sequence number, so a handle that was
//!   cancelled or superseded can never fire

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::PlaybackTime;

/// Handle for one scheduled tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerHandle {
    /// Monotonic sequence number, unique per slot.
    pub id: u64,
    /// Time at which the tick is due.
    pub due: PlaybackTime,
}

/// Owner of the single outstanding timer.
///
/// # Example
///
/// ```rust
/// use algoviz::engine::{PlaybackTime, TimerSlot};
///
/// let mut slot = TimerSlot::new();
/// let first = slot.schedule(PlaybackTime::from_millis(100));
/// let second = slot.schedule(PlaybackTime::from_millis(200));
///
/// assert!(!slot.is_current(first));
/// assert!(slot.is_current(second));
/// ```
#[derive(Debug, Default)]
pub struct TimerSlot {
    /// The outstanding timer, if any.
    pending: Option<TimerHandle>,
    /// Monotonic sequence counter.
    sequence: u64,
}

impl TimerSlot {
    /// Create an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a tick at `due`, cancelling any outstanding one.
    pub fn schedule(&mut self, due: PlaybackTime) -> TimerHandle {
        self.cancel();
        let handle = TimerHandle {
            id: self.sequence,
            due,
        };
        self.sequence += 1;
        self.pending = Some(handle);
        trace!(id = handle.id, %due, "timer scheduled");
        handle
    }

    /// Cancel the outstanding tick, returning it if there was one.
    pub fn cancel(&mut self) -> Option<TimerHandle> {
        let cancelled = self.pending.take();
        if let Some(handle) = cancelled {
            trace!(id = handle.id, "timer cancelled");
        }
        cancelled
    }

    /// The outstanding tick.
    #[must_use]
    pub const fn pending(&self) -> Option<TimerHandle> {
        self.pending
    }

    /// Whether `handle` is the outstanding tick.
    #[must_use]
    pub fn is_current(&self, handle: TimerHandle) -> bool {
        self.pending == Some(handle)
    }

    /// Remove and return the outstanding tick if `handle` is still current.
    ///
    /// Stale handles (cancelled or superseded) return `None` and leave the
    /// slot untouched.
    pub fn claim(&mut self, handle: TimerHandle) -> Option<TimerHandle> {
        if self.is_current(handle) {
            self.pending.take()
        } else {
            trace!(id = handle.id, "stale timer ignored");
            None
        }
    }

    /// The outstanding tick, if it is due at or before `now`.
    #[must_use]
    pub fn due_by(&self, now: PlaybackTime) -> Option<TimerHandle> {
        self.pending.filter(|h| h.due <= now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_replaces_pending() {
        let mut slot = TimerSlot::new();
        let a = slot.schedule(PlaybackTime::from_millis(10));
        let b = slot.schedule(PlaybackTime::from_millis(20));
        assert_ne!(a.id, b.id);
        assert_eq!(slot.pending(), Some(b));
    }

    #[test]
    fn test_cancel_clears_slot() {
        let mut slot = TimerSlot::new();
        let a = slot.schedule(PlaybackTime::from_millis(10));
        assert_eq!(slot.cancel(), Some(a));
        assert_eq!(slot.cancel(), None);
        assert!(slot.pending().is_none());
    }

    #[test]
    fn test_claim_current_handle() {
        let mut slot = TimerSlot::new();
        let a = slot.schedule(PlaybackTime::from_millis(10));
        assert_eq!(slot.claim(a), Some(a));
        assert!(slot.pending().is_none());
    }

    #[test]
    fn test_claim_stale_handle_is_ignored() {
        let mut slot = TimerSlot::new();
        let stale = slot.schedule(PlaybackTime::from_millis(10));
        let live = slot.schedule(PlaybackTime::from_millis(10));
        assert_eq!(slot.claim(stale), None);
        assert_eq!(slot.pending(), Some(live));
    }

    #[test]
    fn test_ids_never_repeat_after_cancel() {
        let mut slot = TimerSlot::new();
        let a = slot.schedule(PlaybackTime::from_millis(10));
        slot.cancel();
        let b = slot.schedule(PlaybackTime::from_millis(10));
        assert_ne!(a, b);
        assert_eq!(slot.claim(a), None);
    }

    #[test]
    fn test_due_by() {
        let mut slot = TimerSlot::new();
        slot.schedule(PlaybackTime::from_millis(100));
        assert!(slot.due_by(PlaybackTime::from_millis(99)).is_none());
        assert!(slot.due_by(PlaybackTime::from_millis(100)).is_some());
        assert!(slot.due_by(PlaybackTime::from_millis(500)).is_some());
    }
}
