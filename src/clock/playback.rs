//! Playback position shown next to the scrubber

use super::format_ms;
use crate::timer::{Scheduler, TimerHandle, TimerId, TimerSlot};

/// Drift (in seconds) tolerated before a progress report moves the position.
/// Progress reports and ticks share a one-second cadence, so a difference of
/// one is ordering noise rather than drift.
const DRIFT_TOLERANCE_SECS: u64 = 1;

/// Result of a decoder seek confirmation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekConfirmation {
    /// The seek landed and the tick was restarted from the target
    Resumed,
    /// The decoder could not complete the seek; the clock stays stopped
    Failed,
    /// No seek was pending (for example the loop's seek back to zero)
    NotPending,
}

/// One-second playback position, kept in step with the decoder
#[derive(Debug, Default)]
pub struct PlaybackClock {
    position_secs: u64,
    total_duration_secs: f64,
    pending_seek: Option<u64>,
    timer: TimerSlot,
}

impl PlaybackClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position_secs(&self) -> u64 {
        self.position_secs
    }

    pub fn total_duration_secs(&self) -> f64 {
        self.total_duration_secs
    }

    pub fn is_ticking(&self) -> bool {
        self.timer.is_active()
    }

    pub fn seek_pending(&self) -> bool {
        self.pending_seek.is_some()
    }

    /// Store the clip length and return the duration label
    pub fn load(&mut self, total_duration_secs: f64) -> String {
        self.total_duration_secs = if total_duration_secs.is_finite() {
            total_duration_secs.max(0.0)
        } else {
            0.0
        };
        format_ms(self.total_duration_secs as u64)
    }

    /// Start ticking from `from_secs`
    pub fn start(&mut self, from_secs: u64, scheduler: &mut dyn Scheduler) {
        self.pending_seek = None;
        self.position_secs = self.clamp(from_secs);
        self.timer.restart(scheduler, TimerId::PlaybackClock);
    }

    /// Stop ticking; the position is kept for `resume`
    pub fn pause(&mut self, scheduler: &mut dyn Scheduler) {
        self.timer.cancel(scheduler);
    }

    /// Restart ticking from the kept position. While a seek is pending the
    /// clock stays stopped until [`confirm_seek`].
    ///
    /// [`confirm_seek`]: PlaybackClock::confirm_seek
    pub fn resume(&mut self, scheduler: &mut dyn Scheduler) {
        if self.pending_seek.is_some() {
            return;
        }
        self.start(self.position_secs, scheduler);
    }

    /// Jump to `to_secs`. Ticking stays off until [`confirm_seek`] reports
    /// that the decoder got there.
    ///
    /// [`confirm_seek`]: PlaybackClock::confirm_seek
    pub fn seek(&mut self, to_secs: u64, scheduler: &mut dyn Scheduler) {
        self.timer.cancel(scheduler);
        self.position_secs = self.clamp(to_secs);
        self.pending_seek = Some(self.position_secs);
    }

    pub fn confirm_seek(
        &mut self,
        completed: bool,
        scheduler: &mut dyn Scheduler,
    ) -> SeekConfirmation {
        let Some(target) = self.pending_seek.take() else {
            return SeekConfirmation::NotPending;
        };

        if completed {
            self.start(target, scheduler);
            SeekConfirmation::Resumed
        } else {
            SeekConfirmation::Failed
        }
    }

    /// Count one second of playback and return the position label
    pub fn on_tick(&mut self, handle: TimerHandle) -> Option<String> {
        if !self.timer.owns(handle) {
            return None;
        }
        self.position_secs = self.clamp(self.position_secs + 1);
        Some(format_ms(self.position_secs))
    }

    /// Take a decoder progress report.
    ///
    /// Returns the fraction, clamped to `[0, 1]`, for the seek control. The
    /// position only follows the report while ticking with no seek pending.
    pub fn on_progress_fraction(&mut self, fraction: f64) -> f64 {
        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };

        if self.is_ticking() && self.pending_seek.is_none() {
            let reported = (fraction * self.total_duration_secs).round() as u64;
            if reported.abs_diff(self.position_secs) > DRIFT_TOLERANCE_SECS {
                tracing::debug!(
                    "Playback clock drifted: {}s shown, decoder at {}s",
                    self.position_secs,
                    reported
                );
                self.position_secs = self.clamp(reported);
            }
        }

        fraction
    }

    /// Loop back to the start and return the reset position label
    pub fn on_playback_ended(&mut self, scheduler: &mut dyn Scheduler) -> String {
        self.start(0, scheduler);
        format_ms(0)
    }

    /// Stop ticking and forget the position
    pub fn reset(&mut self, scheduler: &mut dyn Scheduler) {
        self.timer.cancel(scheduler);
        self.pending_seek = None;
        self.position_secs = 0;
    }

    fn clamp(&self, secs: u64) -> u64 {
        if self.total_duration_secs > 0.0 {
            secs.min(self.total_duration_secs.ceil() as u64)
        } else {
            secs
        }
    }
}
