//! Repeating timers with cancellable handles
//!
//! Coordinators never own a timer task directly. They ask a [`Scheduler`]
//! for a repeating tick and keep the returned [`TimerHandle`]; every tick is
//! delivered back to the owning screen tagged with that handle. Handles carry
//! a generation that is never reused, so a coordinator can tell a tick of
//! its live timer from one that was already in flight when it was cancelled.

mod manual;
mod tokio_scheduler;

pub use manual::ManualScheduler;
pub use tokio_scheduler::{TickReceiver, TokioScheduler};

use std::time::Duration;

/// Period of every coordinator tick
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Which coordinator a timer belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerId {
    Countdown,
    RecordingClock,
    PlaybackClock,
}

/// Cancellable reference to one scheduled repeating timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle {
    pub timer: TimerId,
    pub generation: u64,
}

/// Schedules repeating ticks for the coordinators of one screen
pub trait Scheduler {
    /// Schedule a tick every `period`, first firing one period from now
    fn schedule_repeating(&mut self, timer: TimerId, period: Duration) -> TimerHandle;

    /// Cancel a timer. Cancelling an unknown or already cancelled handle is a no-op.
    fn cancel(&mut self, handle: TimerHandle);
}

/// Tick slot owned by a single coordinator.
///
/// Wraps the coordinator's current handle so that rescheduling always cancels
/// first and stale ticks are recognised in one place.
#[derive(Debug, Default)]
pub struct TimerSlot {
    handle: Option<TimerHandle>,
}

impl TimerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel whatever is pending, then schedule a fresh repeating tick
    pub fn restart(&mut self, scheduler: &mut dyn Scheduler, timer: TimerId) {
        self.cancel(scheduler);
        self.handle = Some(scheduler.schedule_repeating(timer, TICK_PERIOD));
    }

    pub fn cancel(&mut self, scheduler: &mut dyn Scheduler) {
        if let Some(handle) = self.handle.take() {
            scheduler.cancel(handle);
        }
    }

    pub fn is_active(&self) -> bool {
        self.handle.is_some()
    }

    /// Whether `handle` is the tick this slot is currently waiting for
    pub fn owns(&self, handle: TimerHandle) -> bool {
        self.handle == Some(handle)
    }
}
