//! Trace playback controller.
//!
//! A [`Player`] walks a cursor over a [`Trace`], either manually
//! ([`Player::step_forward`]) or automatically on a cooperative timer
//! ([`Player::play`]). It owns exactly one [`TimerSlot`], so there is never
//! more than one pending auto-advance, and every transition that stops
//! playback cancels it.
//!
//! The player does not read a wall clock. The host event loop drives it,
//! either by reporting elapsed time with [`Player::advance`] or by forwarding
//! its own timer callbacks to [`Player::fire`].
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use algoviz::algorithms::sorting::BubbleSort;
//! use algoviz::player::{Player, PlayerStatus};
//! use algoviz::trace::TraceGenerator;
//!
//! let trace = BubbleSort.generate(&[3, 2, 1]).unwrap();
//! let mut player = Player::with_speed(Duration::from_millis(100));
//! player.load_new_trace(trace).unwrap();
//! player.play();
//!
//! // Three ticks elapse: exactly three steps, one per tick.
//! assert_eq!(player.advance(Duration::from_millis(300)), 3);
//! assert_eq!(player.cursor(), 3);
//! assert_eq!(player.status(), PlayerStatus::Running);
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::engine::{PlaybackTime, TimerHandle, TimerSlot};
use crate::error::{VizError, VizResult};
use crate::trace::{Snapshot, StepKind, Trace};

/// Default delay between auto-advances.
pub const DEFAULT_SPEED: Duration = Duration::from_millis(500);

/// Fastest accepted playback speed.
pub const MIN_SPEED: Duration = Duration::from_millis(10);

/// Slowest accepted playback speed.
pub const MAX_SPEED: Duration = Duration::from_millis(5000);

/// Player state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerStatus {
    /// No trace loaded.
    Idle,
    /// Trace loaded, not running.
    Ready,
    /// Auto-advancing.
    Running,
    /// Auto-advance suspended by the user.
    Paused,
    /// Cursor is on the last snapshot.
    Finished,
}

/// Playback controller for one visualization.
#[derive(Debug)]
pub struct Player<K, S> {
    trace: Option<Trace<K, S>>,
    cursor: usize,
    status: PlayerStatus,
    speed: Duration,
    timer: TimerSlot,
    now: PlaybackTime,
}

impl<K: StepKind, S> Default for Player<K, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: StepKind, S> Player<K, S> {
    /// Create an idle player with [`DEFAULT_SPEED`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_speed(DEFAULT_SPEED)
    }

    /// Create an idle player with the given speed (clamped to
    /// [`MIN_SPEED`]..=[`MAX_SPEED`]).
    #[must_use]
    pub fn with_speed(speed: Duration) -> Self {
        Self {
            trace: None,
            cursor: 0,
            status: PlayerStatus::Idle,
            speed: clamp_speed(speed),
            timer: TimerSlot::new(),
            now: PlaybackTime::ZERO,
        }
    }

    // === Accessors ===

    /// Current state.
    #[must_use]
    pub const fn status(&self) -> PlayerStatus {
        self.status
    }

    /// Whether the cursor auto-advances.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.status == PlayerStatus::Running
    }

    /// Cursor position.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Delay between auto-advances.
    #[must_use]
    pub const fn speed(&self) -> Duration {
        self.speed
    }

    /// Playback time the player has been advanced to.
    #[must_use]
    pub const fn now(&self) -> PlaybackTime {
        self.now
    }

    /// Loaded trace.
    #[must_use]
    pub const fn trace(&self) -> Option<&Trace<K, S>> {
        self.trace.as_ref()
    }

    /// Number of snapshots in the loaded trace (0 when idle).
    #[must_use]
    pub fn len(&self) -> usize {
        self.trace.as_ref().map_or(0, Trace::len)
    }

    /// Whether no trace is loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trace.is_none()
    }

    /// Snapshot under the cursor.
    #[must_use]
    pub fn current(&self) -> Option<&Snapshot<K, S>> {
        self.trace.as_ref().and_then(|t| t.get(self.cursor))
    }

    /// Fraction of the trace already shown, in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f64 {
        match self.len() {
            0 => 0.0,
            1 => 1.0,
            n => self.cursor as f64 / (n - 1) as f64,
        }
    }

    /// The outstanding auto-advance tick, if any.
    #[must_use]
    pub const fn pending_timer(&self) -> Option<TimerHandle> {
        self.timer.pending()
    }

    fn at_end(&self) -> bool {
        self.trace
            .as_ref()
            .is_some_and(|t| self.cursor >= t.last_index())
    }

    // === Transitions ===

    /// Replace the trace, rewinding to the first snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`VizError::EmptyTrace`] for a trace without snapshots; the
    /// player is left unchanged in that case.
    pub fn load_new_trace(&mut self, trace: Trace<K, S>) -> VizResult<()> {
        if trace.is_empty() {
            return Err(VizError::EmptyTrace);
        }
        self.timer.cancel();
        debug!(steps = trace.len(), "trace loaded");
        self.trace = Some(trace);
        self.cursor = 0;
        self.status = PlayerStatus::Ready;
        Ok(())
    }

    /// Start auto-advancing from the current cursor.
    ///
    /// No-op when idle, already running, or on the last snapshot.
    pub fn play(&mut self) {
        if !matches!(self.status, PlayerStatus::Ready | PlayerStatus::Paused) || self.at_end() {
            return;
        }
        self.status = PlayerStatus::Running;
        let handle = self.timer.schedule(self.now.after(self.speed));
        debug!(cursor = self.cursor, due = %handle.due, "play");
    }

    /// Suspend auto-advance. No-op unless running.
    pub fn pause(&mut self) {
        if self.status != PlayerStatus::Running {
            return;
        }
        self.timer.cancel();
        self.status = PlayerStatus::Paused;
        debug!(cursor = self.cursor, "pause");
    }

    /// Advance one snapshot. Returns whether the cursor moved.
    ///
    /// Reaching the last snapshot stops playback; stepping past it is a
    /// silent no-op.
    pub fn step_forward(&mut self) -> bool {
        if self.status == PlayerStatus::Idle || self.at_end() {
            return false;
        }
        self.cursor += 1;
        if self.at_end() {
            self.finish();
        }
        debug!(cursor = self.cursor, status = ?self.status, "step");
        true
    }

    /// Rewind to the first snapshot, keeping the trace. No-op when idle.
    pub fn reset(&mut self) {
        if self.status == PlayerStatus::Idle {
            return;
        }
        self.timer.cancel();
        self.cursor = 0;
        self.status = PlayerStatus::Ready;
        debug!("reset");
    }

    /// Change the auto-advance delay (clamped to
    /// [`MIN_SPEED`]..=[`MAX_SPEED`]).
    ///
    /// A tick that is already scheduled keeps its due time; the new speed
    /// applies from the next one.
    pub fn set_speed(&mut self, speed: Duration) {
        self.speed = clamp_speed(speed);
        debug!(speed_ms = self.speed.as_millis(), "speed changed");
    }

    /// Jump to `index` (clamped to the last snapshot) and stop auto-advance.
    pub fn seek(&mut self, index: usize) {
        let Some(last) = self.trace.as_ref().map(Trace::last_index) else {
            return;
        };
        self.timer.cancel();
        self.cursor = index.min(last);
        self.status = if self.cursor == last {
            PlayerStatus::Finished
        } else if self.cursor == 0 {
            PlayerStatus::Ready
        } else {
            PlayerStatus::Paused
        };
        debug!(cursor = self.cursor, status = ?self.status, "seek");
    }

    // === Timer driving ===

    /// Let `elapsed` playback time pass, firing every tick that falls due.
    ///
    /// Returns the number of steps taken. Each tick advances exactly one
    /// snapshot and schedules the next tick `speed` after its own due time.
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        self.now = self.now.after(elapsed);
        let mut steps = 0;
        while let Some(handle) = self.timer.due_by(self.now) {
            if !self.fire(handle) {
                break;
            }
            steps += 1;
        }
        steps
    }

    /// Deliver a tick from the host's own timer.
    ///
    /// Stale handles (cancelled by `pause`, `reset`, `seek`,
    /// `load_new_trace`, or superseded by a newer tick) are ignored and
    /// return `false`.
    pub fn fire(&mut self, handle: TimerHandle) -> bool {
        if self.timer.claim(handle).is_none() || self.status != PlayerStatus::Running {
            return false;
        }
        self.now = self.now.max(handle.due);
        if !self.step_forward() {
            self.finish();
            return false;
        }
        if self.status == PlayerStatus::Running {
            self.timer.schedule(handle.due.after(self.speed));
        }
        true
    }

    fn finish(&mut self) {
        self.timer.cancel();
        self.status = PlayerStatus::Finished;
        if let Some(kind) = self.current().map(|s| *s.kind()) {
            debug!(cursor = self.cursor, outcome = kind.label(), "finished");
        }
    }
}

impl<K, S> Drop for Player<K, S> {
    fn drop(&mut self) {
        self.timer.cancel();
    }
}

fn clamp_speed(speed: Duration) -> Duration {
    speed.clamp(MIN_SPEED, MAX_SPEED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::tests::{counting_trace, Tick};

    const TICK: Duration = Duration::from_millis(100);

    fn loaded(n: usize) -> Player<Tick, Vec<usize>> {
        let mut player = Player::with_speed(TICK);
        player.load_new_trace(counting_trace(n)).expect("load");
        player
    }

    #[test]
    fn test_new_player_is_idle() {
        let player: Player<Tick, ()> = Player::new();
        assert_eq!(player.status(), PlayerStatus::Idle);
        assert_eq!(player.cursor(), 0);
        assert_eq!(player.len(), 0);
        assert!(player.current().is_none());
        assert_eq!(player.speed(), DEFAULT_SPEED);
    }

    #[test]
    fn test_idle_misuse_is_noop() {
        let mut player: Player<Tick, ()> = Player::new();
        player.play();
        player.pause();
        player.reset();
        player.seek(3);
        assert!(!player.step_forward());
        assert_eq!(player.advance(Duration::from_secs(10)), 0);
        assert_eq!(player.status(), PlayerStatus::Idle);
        assert!(player.pending_timer().is_none());
    }

    #[test]
    fn test_load_sets_ready() {
        let player = loaded(5);
        assert_eq!(player.status(), PlayerStatus::Ready);
        assert_eq!(player.cursor(), 0);
        assert!(!player.is_running());
        assert_eq!(player.current().map(Snapshot::narration), Some("tick 0"));
    }

    #[test]
    fn test_step_forward_reaches_end_and_stops() {
        let mut player = loaded(4);
        assert!(player.step_forward());
        assert!(player.step_forward());
        assert_eq!(player.status(), PlayerStatus::Ready);
        assert!(player.step_forward());
        assert_eq!(player.cursor(), 3);
        assert_eq!(player.status(), PlayerStatus::Finished);
        assert!(!player.step_forward());
        assert_eq!(player.cursor(), 3);
    }

    #[test]
    fn test_play_schedules_single_timer() {
        let mut player = loaded(5);
        player.play();
        assert!(player.is_running());
        let first = player.pending_timer().expect("scheduled");
        assert_eq!(first.due, PlaybackTime::from_millis(100));

        // Playing again does not schedule a second timer.
        player.play();
        assert_eq!(player.pending_timer(), Some(first));
    }

    #[test]
    fn test_advance_one_step_per_tick() {
        let mut player = loaded(10);
        player.play();
        assert_eq!(player.advance(Duration::from_millis(99)), 0);
        assert_eq!(player.advance(Duration::from_millis(1)), 1);
        assert_eq!(player.cursor(), 1);
        assert_eq!(player.advance(Duration::from_millis(250)), 2);
        assert_eq!(player.cursor(), 3);
    }

    #[test]
    fn test_auto_advance_stops_at_end() {
        let mut player = loaded(4);
        player.play();
        assert_eq!(player.advance(Duration::from_secs(60)), 3);
        assert_eq!(player.cursor(), 3);
        assert_eq!(player.status(), PlayerStatus::Finished);
        assert!(player.pending_timer().is_none());
    }

    #[test]
    fn test_play_at_end_is_noop() {
        let mut player = loaded(2);
        player.step_forward();
        assert_eq!(player.status(), PlayerStatus::Finished);
        player.play();
        assert_eq!(player.status(), PlayerStatus::Finished);
        assert!(!player.is_running());
        assert!(player.pending_timer().is_none());
    }

    #[test]
    fn test_pause_cancels_timer() {
        let mut player = loaded(5);
        player.play();
        let handle = player.pending_timer().expect("scheduled");
        player.pause();
        assert_eq!(player.status(), PlayerStatus::Paused);
        assert!(player.pending_timer().is_none());
        assert!(!player.fire(handle));
        assert_eq!(player.advance(Duration::from_secs(5)), 0);
        assert_eq!(player.cursor(), 0);
    }

    #[test]
    fn test_pause_then_resume() {
        let mut player = loaded(5);
        player.play();
        player.advance(TICK);
        player.pause();
        player.play();
        assert!(player.is_running());
        player.advance(TICK);
        assert_eq!(player.cursor(), 2);
    }

    #[test]
    fn test_reset_cancels_stale_timer() {
        let mut player = loaded(5);
        player.play();
        player.advance(TICK);
        let stale = player.pending_timer().expect("scheduled");
        player.reset();
        assert_eq!(player.cursor(), 0);
        assert_eq!(player.status(), PlayerStatus::Ready);
        assert_eq!(player.len(), 5);
        assert!(!player.fire(stale));
        assert_eq!(player.cursor(), 0);
    }

    #[test]
    fn test_load_new_trace_supersedes_timer() {
        let mut player = loaded(5);
        player.play();
        let stale = player.pending_timer().expect("scheduled");
        player.load_new_trace(counting_trace(3)).expect("load");
        assert_eq!(player.status(), PlayerStatus::Ready);
        assert_eq!(player.len(), 3);
        assert!(player.pending_timer().is_none());
        assert!(!player.fire(stale));
    }

    #[test]
    fn test_fire_with_host_timer() {
        let mut player = loaded(3);
        player.play();
        let first = player.pending_timer().expect("scheduled");
        assert!(player.fire(first));
        assert_eq!(player.cursor(), 1);
        // The same handle cannot fire twice.
        assert!(!player.fire(first));
        let second = player.pending_timer().expect("rescheduled");
        assert_eq!(second.due, PlaybackTime::from_millis(200));
        assert!(player.fire(second));
        assert_eq!(player.status(), PlayerStatus::Finished);
    }

    #[test]
    fn test_speed_change_applies_to_next_tick() {
        let mut player = loaded(10);
        player.play();
        player.set_speed(Duration::from_millis(1000));
        // The in-flight tick keeps its original due time.
        assert_eq!(player.advance(TICK), 1);
        let next = player.pending_timer().expect("rescheduled");
        assert_eq!(next.due, PlaybackTime::from_millis(1100));
    }

    #[test]
    fn test_speed_is_clamped() {
        let mut player: Player<Tick, ()> = Player::new();
        player.set_speed(Duration::ZERO);
        assert_eq!(player.speed(), MIN_SPEED);
        player.set_speed(Duration::from_secs(3600));
        assert_eq!(player.speed(), MAX_SPEED);
    }

    #[test]
    fn test_manual_step_while_running_keeps_single_timer() {
        let mut player = loaded(10);
        player.play();
        let handle = player.pending_timer().expect("scheduled");
        player.step_forward();
        assert_eq!(player.pending_timer(), Some(handle));
        player.advance(TICK);
        assert_eq!(player.cursor(), 2);
    }

    #[test]
    fn test_seek() {
        let mut player = loaded(6);
        player.play();
        player.seek(3);
        assert_eq!(player.cursor(), 3);
        assert_eq!(player.status(), PlayerStatus::Paused);
        assert!(player.pending_timer().is_none());

        player.seek(100);
        assert_eq!(player.cursor(), 5);
        assert_eq!(player.status(), PlayerStatus::Finished);

        player.seek(0);
        assert_eq!(player.status(), PlayerStatus::Ready);
    }

    #[test]
    fn test_progress() {
        let mut player = loaded(5);
        assert!((player.progress() - 0.0).abs() < f64::EPSILON);
        player.seek(2);
        assert!((player.progress() - 0.5).abs() < f64::EPSILON);
        player.seek(4);
        assert!((player.progress() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_single_snapshot_trace() {
        let mut player = loaded(1);
        player.play();
        assert_eq!(player.status(), PlayerStatus::Ready);
        assert!(!player.step_forward());
        assert!((player.progress() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&PlayerStatus::Running).expect("serialize");
        assert_eq!(json, "\"running\"");
    }
}
