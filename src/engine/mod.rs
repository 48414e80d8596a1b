//! Playback timing primitives.
//!
//! Implements the cooperative, single-threaded timing model used by the
//! [`Player`](crate::player::Player):
//! - Fixed-point playback time (no floating-point drift across ticks)
//! - A single-slot, cancellable timer with stale-handle detection

pub mod timer;

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub use timer::{TimerHandle, TimerSlot};

/// Playback time representation.
///
/// Internal representation is in nanoseconds since the player was created.
/// Only ever moves forward.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct PlaybackTime {
    /// Time in nanoseconds from player start.
    nanos: u64,
}

impl PlaybackTime {
    /// Zero time (player start).
    pub const ZERO: Self = Self { nanos: 0 };

    /// Create time from milliseconds.
    #[must_use]
    pub const fn from_millis(millis: u64) -> Self {
        Self {
            nanos: millis.saturating_mul(1_000_000),
        }
    }

    /// Create time from nanoseconds.
    #[must_use]
    pub const fn from_nanos(nanos: u64) -> Self {
        Self { nanos }
    }

    /// Get time as nanoseconds.
    #[must_use]
    pub const fn as_nanos(&self) -> u64 {
        self.nanos
    }

    /// Get time as whole milliseconds.
    #[must_use]
    pub const fn as_millis(&self) -> u64 {
        self.nanos / 1_000_000
    }

    /// Add a duration, saturating at the representable maximum.
    #[must_use]
    pub fn after(self, delay: Duration) -> Self {
        let delay_nanos = u64::try_from(delay.as_nanos()).unwrap_or(u64::MAX);
        Self {
            nanos: self.nanos.saturating_add(delay_nanos),
        }
    }

    /// Duration from `earlier` to `self`, zero if `earlier` is later.
    #[must_use]
    pub const fn since(self, earlier: Self) -> Duration {
        Duration::from_nanos(self.nanos.saturating_sub(earlier.nanos))
    }
}

impl std::fmt::Display for PlaybackTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}ms", self.as_millis())
    }
}
