//! Pre-roll countdown before a recording starts
//!
//! The coordinator turns a preset into one frame per second and signals
//! exactly one "START" frame, which is what the capture screen uses to begin
//! recording. The number zero is never displayed.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::timer::{Scheduler, TimerHandle, TimerId, TimerSlot};

/// Countdown length chosen with the timer control
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum CountdownPreset {
    /// Record one tick after the record control is tapped
    #[default]
    None,
    /// Three seconds
    Short,
    /// Five seconds
    Medium,
    /// Ten seconds
    Long,
}

impl CountdownPreset {
    /// Length of the countdown in seconds
    pub fn seconds(self) -> u32 {
        match self {
            CountdownPreset::None => 0,
            CountdownPreset::Short => 3,
            CountdownPreset::Medium => 5,
            CountdownPreset::Long => 10,
        }
    }

    /// Next preset in the cycle None -> Short -> Medium -> Long -> None
    pub fn next(self) -> Self {
        match self {
            CountdownPreset::None => CountdownPreset::Short,
            CountdownPreset::Short => CountdownPreset::Medium,
            CountdownPreset::Medium => CountdownPreset::Long,
            CountdownPreset::Long => CountdownPreset::None,
        }
    }
}

/// One displayed countdown value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownFrame {
    /// Seconds left before recording, never zero
    Seconds(u32),
    /// Recording should begin now
    Start,
}

impl fmt::Display for CountdownFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountdownFrame::Seconds(n) => write!(f, "{}", n),
            CountdownFrame::Start => f.write_str("START"),
        }
    }
}

/// Signal emitted by the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownEvent {
    ShowTimer,
    Frame(CountdownFrame),
    HideTimer,
}

/// Countdown state machine
#[derive(Debug)]
pub struct CountdownCoordinator {
    preset: CountdownPreset,
    remaining: i64,
    timer: TimerSlot,
}

impl CountdownCoordinator {
    pub fn new(preset: CountdownPreset) -> Self {
        Self {
            preset,
            remaining: i64::from(preset.seconds()),
            timer: TimerSlot::new(),
        }
    }

    pub fn preset(&self) -> CountdownPreset {
        self.preset
    }

    /// Value the next tick will act on. Only meaningful while running.
    pub fn remaining(&self) -> i64 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_active()
    }

    /// Change the preset, cancelling a countdown in progress.
    ///
    /// Emits nothing. Returns `true` if a running countdown was cancelled.
    pub fn configure(&mut self, preset: CountdownPreset, scheduler: &mut dyn Scheduler) -> bool {
        let was_running = self.is_running();
        self.preset = preset;
        self.reset(scheduler);
        was_running
    }

    /// Begin counting down. Returns `None` if a countdown is already running.
    pub fn start(&mut self, scheduler: &mut dyn Scheduler) -> Option<CountdownEvent> {
        if self.is_running() {
            return None;
        }

        self.remaining = i64::from(self.preset.seconds());
        self.timer.restart(scheduler, TimerId::Countdown);
        tracing::debug!("Countdown started ({}s)", self.preset.seconds());
        Some(CountdownEvent::ShowTimer)
    }

    /// Handle a countdown tick. Ticks from a cancelled timer yield `None`.
    pub fn on_tick(
        &mut self,
        handle: TimerHandle,
        scheduler: &mut dyn Scheduler,
    ) -> Option<CountdownEvent> {
        if !self.timer.owns(handle) {
            return None;
        }

        let event = if self.remaining > 0 {
            // remaining is bounded by the preset, so it fits
            CountdownEvent::Frame(CountdownFrame::Seconds(self.remaining as u32))
        } else if self.remaining == 0 {
            CountdownEvent::Frame(CountdownFrame::Start)
        } else {
            self.reset(scheduler);
            return Some(CountdownEvent::HideTimer);
        };

        self.remaining -= 1;
        Some(event)
    }

    /// Cancel any pending tick and rewind to the preset
    pub fn reset(&mut self, scheduler: &mut dyn Scheduler) {
        self.timer.cancel(scheduler);
        self.remaining = i64::from(self.preset.seconds());
    }
}
