//! Playback screen controller

use std::path::Path;
use tracing::{debug, info};
use uuid::Uuid;

use super::view::PlaybackView;
use super::Decoder;
use crate::clock::{format_ms, PlaybackClock, SeekConfirmation};
use crate::storage::RecordingStore;
use crate::timer::{Scheduler, TimerHandle, TimerId};
use crate::{Result, RetakeError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Playing,
    Paused,
}

/// Drives the decoder and the playback clock for one review of a clip
pub struct PlaybackController<D: Decoder, S: Scheduler> {
    session_id: Uuid,
    decoder: D,
    scheduler: S,
    store: RecordingStore,
    clock: PlaybackClock,
    state: PlaybackState,
}

impl<D: Decoder, S: Scheduler> PlaybackController<D, S> {
    pub fn new(decoder: D, scheduler: S, store: RecordingStore) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            decoder,
            scheduler,
            store,
            clock: PlaybackClock::new(),
            state: PlaybackState::Paused,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn position_secs(&self) -> u64 {
        self.clock.position_secs()
    }

    pub fn duration_secs(&self) -> f64 {
        self.clock.total_duration_secs()
    }

    pub fn seek_pending(&self) -> bool {
        self.clock.seek_pending()
    }

    pub fn decoder(&self) -> &D {
        &self.decoder
    }

    pub fn decoder_mut(&mut self) -> &mut D {
        &mut self.decoder
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Open the screen on `path` and start playing from the beginning
    pub fn enter(&mut self, path: &Path, view: &mut dyn PlaybackView) -> Result<()> {
        info!(
            "Playback screen {} opened on {} ({} backend)",
            self.session_id,
            path.display(),
            self.decoder.backend_name()
        );

        let duration = match self.decoder.load(path) {
            Ok(duration) => duration,
            Err(e) => {
                view.present_error(&e.to_string());
                return Err(e);
            }
        };

        view.set_duration_label(&self.clock.load(duration));
        view.set_position_label(&format_ms(0));
        view.set_scrubber(0.0);

        self.decoder.play();
        self.clock.start(0, &mut self.scheduler);
        self.state = PlaybackState::Playing;
        view.show_play_icon(false);
        Ok(())
    }

    pub fn toggle_play_pause(&mut self, view: &mut dyn PlaybackView) -> PlaybackState {
        match self.state {
            PlaybackState::Playing => {
                self.decoder.pause();
                self.clock.pause(&mut self.scheduler);
                self.state = PlaybackState::Paused;
                view.show_play_icon(true);
            }
            PlaybackState::Paused => {
                self.decoder.play();
                self.clock.resume(&mut self.scheduler);
                self.state = PlaybackState::Playing;
                view.show_play_icon(false);
            }
        }
        debug!("Playback {:?} at {}s", self.state, self.clock.position_secs());
        self.state
    }

    /// The scrubber was released at `fraction` of the clip
    pub fn seek_committed(&mut self, fraction: f64) -> u64 {
        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        let target = (fraction * self.clock.total_duration_secs()).round() as u64;

        self.clock.seek(target, &mut self.scheduler);
        self.decoder.seek(target);
        debug!("Seeking to {}s", target);
        target
    }

    /// The decoder finished (or gave up on) the last seek
    pub fn on_seek_completed(&mut self, completed: bool, view: &mut dyn PlaybackView) -> Result<()> {
        match self.clock.confirm_seek(completed, &mut self.scheduler) {
            SeekConfirmation::Resumed => {
                self.decoder.play();
                self.state = PlaybackState::Playing;
                view.show_play_icon(false);
                Ok(())
            }
            SeekConfirmation::Failed => {
                self.decoder.pause();
                self.state = PlaybackState::Paused;
                view.show_play_icon(true);
                Err(RetakeError::Seek(format!(
                    "Decoder did not reach {}s",
                    self.clock.position_secs()
                )))
            }
            SeekConfirmation::NotPending => Ok(()),
        }
    }

    /// Decoder progress report; callers throttle these to once a second
    pub fn on_progress(&mut self, fraction: f64, view: &mut dyn PlaybackView) {
        if self.clock.seek_pending() {
            return;
        }
        let fraction = self.clock.on_progress_fraction(fraction);
        view.set_scrubber(fraction);
    }

    /// End of media: loop back to the start without user action
    pub fn on_playback_ended(&mut self, view: &mut dyn PlaybackView) {
        let label = self.clock.on_playback_ended(&mut self.scheduler);
        view.set_position_label(&label);
        view.set_scrubber(0.0);

        self.decoder.seek(0);
        self.decoder.play();
        self.state = PlaybackState::Playing;
        view.show_play_icon(false);
        debug!("Looping playback");
    }

    pub fn on_timer(&mut self, handle: TimerHandle, view: &mut dyn PlaybackView) {
        match handle.timer {
            TimerId::PlaybackClock => {
                if let Some(label) = self.clock.on_tick(handle) {
                    view.set_position_label(&label);
                }
            }
            other => debug!("Ignoring {:?} tick on the playback screen", other),
        }
    }

    /// Throw the clip away and go back to capture
    pub fn retake(&mut self, view: &mut dyn PlaybackView) -> Result<()> {
        self.leave();
        let result = self.store.discard();
        view.dismiss();
        result.map(|_| ())
    }

    /// Stop the clock and release the decoder
    pub fn leave(&mut self) {
        self.clock.reset(&mut self.scheduler);
        self.decoder.pause();
        self.decoder.unload();
        self.state = PlaybackState::Paused;
        info!("Playback screen {} closed", self.session_id);
    }
}
