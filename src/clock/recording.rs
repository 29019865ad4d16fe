//! Elapsed time of the clip being recorded

use super::format_hms;
use crate::timer::{Scheduler, TimerHandle, TimerId, TimerSlot};

/// Counts whole seconds while a recording is in progress
#[derive(Debug, Default)]
pub struct RecordingClock {
    elapsed_secs: u64,
    timer: TimerSlot,
}

impl RecordingClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ticks since the last `start`
    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    pub fn is_active(&self) -> bool {
        self.timer.is_active()
    }

    pub fn start(&mut self, scheduler: &mut dyn Scheduler) {
        self.elapsed_secs = 0;
        self.timer.restart(scheduler, TimerId::RecordingClock);
    }

    /// Emit the current label, then count the second
    pub fn on_tick(&mut self, handle: TimerHandle) -> Option<String> {
        if !self.timer.owns(handle) {
            return None;
        }
        let label = format_hms(self.elapsed_secs);
        self.elapsed_secs += 1;
        Some(label)
    }

    /// Stop counting and return the reset label
    pub fn stop(&mut self, scheduler: &mut dyn Scheduler) -> String {
        self.timer.cancel(scheduler);
        self.elapsed_secs = 0;
        format_hms(0)
    }
}
