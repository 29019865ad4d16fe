//! Capture screen state machine

use std::path::PathBuf;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::view::{CaptureView, RecordIcon};
use crate::capture::{CameraFacing, CaptureDevice, PermissionStatus};
use crate::clock::{format_hms, RecordingClock};
use crate::countdown::{CountdownCoordinator, CountdownEvent, CountdownFrame, CountdownPreset};
use crate::storage::RecordingStore;
use crate::timer::{Scheduler, TimerHandle, TimerId};
use crate::{Result, RetakeError};

/// Where the record control is in its cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    Idle,
    CountingDown,
    Recording,
}

/// Capture screen controller.
///
/// Owns the countdown and recording clock exclusively; the only path from a
/// finished countdown to a running recording goes through this type.
pub struct SessionController<C: CaptureDevice, S: Scheduler> {
    session_id: Uuid,
    capture: C,
    scheduler: S,
    store: RecordingStore,
    countdown: CountdownCoordinator,
    clock: RecordingClock,
    state: CaptureState,
    facing: CameraFacing,
}

impl<C: CaptureDevice, S: Scheduler> SessionController<C, S> {
    pub fn new(
        capture: C,
        scheduler: S,
        store: RecordingStore,
        preset: CountdownPreset,
        facing: CameraFacing,
    ) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            capture,
            scheduler,
            store,
            countdown: CountdownCoordinator::new(preset),
            clock: RecordingClock::new(),
            state: CaptureState::Idle,
            facing,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn facing(&self) -> CameraFacing {
        self.facing
    }

    pub fn preset(&self) -> CountdownPreset {
        self.countdown.preset()
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.clock.elapsed_secs()
    }

    pub fn is_counting_down(&self) -> bool {
        self.countdown.is_running()
    }

    pub fn capture(&self) -> &C {
        &self.capture
    }

    pub fn capture_mut(&mut self) -> &mut C {
        &mut self.capture
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Open the screen: check permission, configure the session and lay out
    /// the controls.
    pub fn enter(&mut self, view: &mut dyn CaptureView) -> Result<()> {
        info!(
            "Capture screen {} opened ({} backend)",
            self.session_id,
            self.capture.backend_name()
        );

        view.set_countdown_preset(self.countdown.preset());
        view.set_elapsed_label(&format_hms(0));
        view.set_record_icon(RecordIcon::Record);
        view.set_flash_visible(self.facing.has_torch());
        view.set_flash_icon(self.capture.is_torch_active());

        let message = match self.capture.request_permission() {
            PermissionStatus::Granted => None,
            PermissionStatus::Denied => {
                Some("Permissions denied, please grant camera access from settings.")
            }
            PermissionStatus::Restricted => Some("Restricted, device owner must approve."),
        };
        if let Some(message) = message {
            view.present_settings_prompt(message);
            return Err(RetakeError::Permission(message.to_string()));
        }

        if let Err(e) = self.capture.configure_session(self.facing) {
            warn!("Capture session not configured: {}", e);
            return Err(e);
        }
        Ok(())
    }

    /// The record/stop control was tapped
    pub fn record_tapped(&mut self, view: &mut dyn CaptureView) {
        match self.state {
            CaptureState::Idle => self.begin_countdown(view),
            CaptureState::CountingDown => {
                debug!("Record tapped during countdown, ignoring");
            }
            CaptureState::Recording => self.stop_recording(view),
        }
    }

    /// Route a tick from the scheduler to the coordinator that owns it
    pub fn on_timer(&mut self, handle: TimerHandle, view: &mut dyn CaptureView) -> Result<()> {
        match handle.timer {
            TimerId::Countdown => {
                if let Some(event) = self.countdown.on_tick(handle, &mut self.scheduler) {
                    return self.apply_countdown(event, view);
                }
            }
            TimerId::RecordingClock => {
                if let Some(label) = self.clock.on_tick(handle) {
                    view.set_elapsed_label(&label);
                }
            }
            TimerId::PlaybackClock => {
                debug!("Ignoring playback tick on the capture screen");
            }
        }
        Ok(())
    }

    /// Cycle to the next countdown preset.
    ///
    /// A countdown in progress is cancelled; if it had not reached START yet
    /// the screen goes back to Idle.
    pub fn cycle_countdown_preset(&mut self, view: &mut dyn CaptureView) -> CountdownPreset {
        let preset = self.countdown.preset().next();
        let cancelled = self.countdown.configure(preset, &mut self.scheduler);
        view.set_countdown_preset(preset);

        if cancelled {
            view.hide_countdown();
            if self.state == CaptureState::CountingDown {
                info!("Countdown cancelled by preset change");
                self.return_to_idle(view);
            }
        }

        debug!("Countdown preset set to {:?}", preset);
        preset
    }

    /// Toggle the torch. Only honoured while idle on the back camera.
    ///
    /// Returns whether the torch is now on. A failed toggle leaves the torch
    /// as it was.
    pub fn toggle_flash(&mut self, view: &mut dyn CaptureView) -> Result<bool> {
        if self.state != CaptureState::Idle {
            debug!("Torch toggle ignored while {:?}", self.state);
            return Ok(self.capture.is_torch_active());
        }
        if !self.facing.has_torch() {
            debug!("Torch toggle ignored on the {:?} camera", self.facing);
            return Ok(false);
        }

        let target = !self.capture.is_torch_active();
        let result = self.capture.set_torch(target);
        view.set_flash_icon(self.capture.is_torch_active());
        result.map(|()| target)
    }

    /// Switch between front and back camera. Only honoured while idle.
    pub fn flip_camera(&mut self, view: &mut dyn CaptureView) -> Result<CameraFacing> {
        if self.state != CaptureState::Idle {
            debug!("Camera flip ignored while {:?}", self.state);
            return Ok(self.facing);
        }

        let target = self.facing.flipped();
        if !target.has_torch() && self.capture.is_torch_active() {
            if let Err(e) = self.capture.set_torch(false) {
                warn!("Could not switch the torch off before flipping: {}", e);
            }
        }

        self.capture.flip(target)?;
        self.facing = target;
        view.set_flash_visible(target.has_torch());
        view.set_flash_icon(self.capture.is_torch_active());

        info!("Switched to {:?} camera", target);
        Ok(target)
    }

    /// The capture device finished writing (or failed to write) the clip.
    ///
    /// On success the screen hands the file over to playback.
    pub fn on_recording_finished(
        &mut self,
        result: Result<PathBuf>,
        view: &mut dyn CaptureView,
    ) -> Result<PathBuf> {
        if self.state == CaptureState::Recording {
            // The device stopped on its own
            self.return_to_idle(view);
        }

        match result {
            Ok(path) => {
                info!("Video saved at: {}", path.display());
                view.navigate_to_playback(&path);
                Ok(path)
            }
            Err(e) => {
                view.present_retry_prompt(&e.to_string());
                Err(e)
            }
        }
    }

    /// Leave the screen from the cancel control
    pub fn cancel(&mut self, view: &mut dyn CaptureView) {
        if self.state == CaptureState::Recording {
            self.stop_recording(view);
        }
        self.leave();
        view.dismiss();
    }

    /// Cancel every timer owned by the screen
    pub fn leave(&mut self) {
        self.countdown.reset(&mut self.scheduler);
        self.clock.stop(&mut self.scheduler);
        info!("Capture screen {} closed", self.session_id);
    }

    fn begin_countdown(&mut self, view: &mut dyn CaptureView) {
        view.set_record_enabled(false);
        view.set_options_visible(false);
        view.set_flash_visible(false);
        view.keep_awake(true);

        self.state = CaptureState::CountingDown;
        if let Some(CountdownEvent::ShowTimer) = self.countdown.start(&mut self.scheduler) {
            view.show_countdown();
        }
        info!(
            "Countdown started ({}s) for session {}",
            self.countdown.preset().seconds(),
            self.session_id
        );
    }

    fn apply_countdown(&mut self, event: CountdownEvent, view: &mut dyn CaptureView) -> Result<()> {
        match event {
            CountdownEvent::ShowTimer => view.show_countdown(),
            CountdownEvent::Frame(frame) => {
                view.update_countdown(&frame.to_string());
                if frame == CountdownFrame::Start && self.state == CaptureState::CountingDown {
                    return self.begin_recording(view);
                }
            }
            CountdownEvent::HideTimer => view.hide_countdown(),
        }
        Ok(())
    }

    fn begin_recording(&mut self, view: &mut dyn CaptureView) -> Result<()> {
        view.set_record_enabled(true);
        view.set_record_icon(RecordIcon::Stop);
        self.state = CaptureState::Recording;
        self.clock.start(&mut self.scheduler);
        view.set_recording_indicator(true);

        let started = match self.store.prepare() {
            Ok(path) => self.capture.start_recording(&path).map(|()| path),
            Err(e) => Err(e),
        };

        match started {
            Ok(path) => {
                info!("Recording started: {}", path.display());
                Ok(())
            }
            Err(e) => {
                self.return_to_idle(view);
                view.present_retry_prompt(&e.to_string());
                Err(e)
            }
        }
    }

    fn stop_recording(&mut self, view: &mut dyn CaptureView) {
        let elapsed = self.clock.elapsed_secs();
        self.capture.stop_recording();
        self.return_to_idle(view);

        if self.capture.is_torch_active() {
            if let Err(e) = self.capture.set_torch(false) {
                warn!("Could not switch the torch off: {}", e);
            }
            view.set_flash_icon(self.capture.is_torch_active());
        }

        info!("Recording stopped after {}s", elapsed);
    }

    fn return_to_idle(&mut self, view: &mut dyn CaptureView) {
        if self.countdown.is_running() {
            self.countdown.reset(&mut self.scheduler);
            view.hide_countdown();
        }

        let label = self.clock.stop(&mut self.scheduler);
        view.set_elapsed_label(&label);
        view.set_recording_indicator(false);
        view.set_record_enabled(true);
        view.set_record_icon(RecordIcon::Record);
        view.set_options_visible(true);
        view.set_flash_visible(self.facing.has_torch());
        view.keep_awake(false);

        self.state = CaptureState::Idle;
    }
}
