//! Playback screen event loop

use std::path::Path;
use tokio::sync::mpsc;
use tokio::time::Instant;

use super::{log_recovered, ProgressThrottle};
use crate::playback::{Decoder, DecoderNotice, PlaybackController, PlaybackView};
use crate::timer::{TickReceiver, TokioScheduler};
use crate::Result;

/// User input on the playback screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlaybackIntent {
    PlayPauseTapped,
    /// Scrubber released at this fraction of the clip
    SeekCommitted(f64),
    RetakeTapped,
}

/// How the playback screen was left
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackOutcome {
    /// The clip was discarded to record again
    Retake,
    /// The screen was closed with the clip kept
    Closed,
}

/// Playback screen wired to tokio
pub struct PlaybackScreen<D: Decoder> {
    controller: PlaybackController<D, TokioScheduler>,
    ticks: TickReceiver,
    intents: mpsc::Receiver<PlaybackIntent>,
    notices: mpsc::UnboundedReceiver<DecoderNotice>,
    throttle: ProgressThrottle,
}

impl<D: Decoder> PlaybackScreen<D> {
    pub fn new(
        controller: PlaybackController<D, TokioScheduler>,
        ticks: TickReceiver,
        intents: mpsc::Receiver<PlaybackIntent>,
        notices: mpsc::UnboundedReceiver<DecoderNotice>,
        throttle: ProgressThrottle,
    ) -> Self {
        Self {
            controller,
            ticks,
            intents,
            notices,
            throttle,
        }
    }

    /// Play `path` until retake or until the intent channel closes
    pub async fn run(mut self, path: &Path, view: &mut dyn PlaybackView) -> Result<PlaybackOutcome> {
        self.controller.enter(path, view)?;

        loop {
            tokio::select! {
                biased;

                Some(handle) = self.ticks.recv() => self.controller.on_timer(handle, view),

                Some(notice) = self.notices.recv() => self.handle_notice(notice, view),

                intent = self.intents.recv() => match intent {
                    Some(PlaybackIntent::PlayPauseTapped) => {
                        self.controller.toggle_play_pause(view);
                    }
                    Some(PlaybackIntent::SeekCommitted(fraction)) => {
                        self.controller.seek_committed(fraction);
                        self.throttle.reset();
                    }
                    Some(PlaybackIntent::RetakeTapped) => {
                        if let Err(e) = self.controller.retake(view) {
                            log_recovered("Could not delete the recording", &e);
                        }
                        return Ok(PlaybackOutcome::Retake);
                    }
                    None => {
                        self.controller.leave();
                        return Ok(PlaybackOutcome::Closed);
                    }
                },
            }
        }
    }

    fn handle_notice(&mut self, notice: DecoderNotice, view: &mut dyn PlaybackView) {
        match notice {
            DecoderNotice::Progress(fraction) => {
                if self.throttle.admit(Instant::now()) {
                    self.controller.on_progress(fraction, view);
                }
            }
            DecoderNotice::SeekCompleted(completed) => {
                if let Err(e) = self.controller.on_seek_completed(completed, view) {
                    log_recovered("Seek failed", &e);
                    view.present_error(&e.to_string());
                }
            }
            DecoderNotice::Ended => {
                self.controller.on_playback_ended(view);
                self.throttle.reset();
            }
        }
    }
}
