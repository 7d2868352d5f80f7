//! Ports the carousel controller depends on
//!
//! The controller never touches a terminal, a DOM, or a clock directly.
//! It writes visual state through [`SlideSurface`] and schedules deferred
//! work through [`TimerDriver`]. Fired timers come back to the controller
//! as [`Stimulus::TimerFired`](super::Stimulus::TimerFired) on the same
//! queue as user input.

use std::fmt;
use std::time::Duration;

/// Opaque handle for one armed timer
///
/// Ids are never reused by a driver, so a stale id can't be confused
/// with a timer armed later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// Outbound visual updates
pub trait SlideSurface {
    /// Move the sliding track. `offset_percent` is `-(index * 100)`.
    fn translate_track(&mut self, offset_percent: i64);

    /// Mark one indicator selected or not selected
    fn set_indicator(&mut self, index: usize, selected: bool);
}

/// Deferred callback scheduling
///
/// Implementations deliver `TimerFired(id)` back to the controller's queue
/// when a timer elapses. After `cancel(id)` returns, the driver must not
/// deliver any further fire for that id.
pub trait TimerDriver {
    /// Arm a one-shot timer
    fn arm_once(&mut self, after: Duration) -> TimerId;

    /// Arm a recurring timer whose first fire is one `period` from now
    fn arm_repeating(&mut self, period: Duration) -> TimerId;

    /// Cancel a timer. Unknown or already-finished ids are ignored.
    fn cancel(&mut self, id: TimerId);
}
