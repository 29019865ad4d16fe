//! Capture screen event loop

use std::path::PathBuf;
use tokio::sync::mpsc;

use super::log_recovered;
use crate::capture::{CaptureDevice, CaptureNotice};
use crate::session::{CaptureView, SessionController};
use crate::timer::{TickReceiver, TokioScheduler};
use crate::Result;

/// User input on the capture screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureIntent {
    RecordTapped,
    FlashTapped,
    CountdownPresetTapped,
    FlipTapped,
    CancelTapped,
}

/// How the capture screen was left
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// A clip was recorded and should be reviewed
    Review(PathBuf),
    /// The user backed out
    Cancelled,
}

/// Capture screen wired to tokio
pub struct CaptureScreen<C: CaptureDevice> {
    controller: SessionController<C, TokioScheduler>,
    ticks: TickReceiver,
    intents: mpsc::Receiver<CaptureIntent>,
    notices: mpsc::UnboundedReceiver<CaptureNotice>,
}

impl<C: CaptureDevice> CaptureScreen<C> {
    pub fn new(
        controller: SessionController<C, TokioScheduler>,
        ticks: TickReceiver,
        intents: mpsc::Receiver<CaptureIntent>,
        notices: mpsc::UnboundedReceiver<CaptureNotice>,
    ) -> Self {
        Self {
            controller,
            ticks,
            intents,
            notices,
        }
    }

    /// Run until a clip is ready for review or the screen is left.
    ///
    /// Closing the intent channel leaves the screen.
    pub async fn run(mut self, view: &mut dyn CaptureView) -> Result<CaptureOutcome> {
        self.controller.enter(view)?;

        loop {
            tokio::select! {
                biased;

                Some(handle) = self.ticks.recv() => {
                    if let Err(e) = self.controller.on_timer(handle, view) {
                        log_recovered("Recording aborted", &e);
                    }
                }

                Some(CaptureNotice::RecordingFinished(result)) = self.notices.recv() => {
                    match self.controller.on_recording_finished(result, view) {
                        Ok(path) => {
                            self.controller.leave();
                            return Ok(CaptureOutcome::Review(path));
                        }
                        Err(e) => log_recovered("Recording failed", &e),
                    }
                }

                intent = self.intents.recv() => match intent {
                    Some(intent) => {
                        if let Some(outcome) = self.handle_intent(intent, view) {
                            return Ok(outcome);
                        }
                    }
                    None => {
                        self.controller.leave();
                        return Ok(CaptureOutcome::Cancelled);
                    }
                },
            }
        }
    }

    fn handle_intent(
        &mut self,
        intent: CaptureIntent,
        view: &mut dyn CaptureView,
    ) -> Option<CaptureOutcome> {
        tracing::debug!("Capture intent: {:?}", intent);
        match intent {
            CaptureIntent::RecordTapped => self.controller.record_tapped(view),
            CaptureIntent::FlashTapped => {
                if let Err(e) = self.controller.toggle_flash(view) {
                    log_recovered("Torch unchanged", &e);
                }
            }
            CaptureIntent::CountdownPresetTapped => {
                self.controller.cycle_countdown_preset(view);
            }
            CaptureIntent::FlipTapped => {
                if let Err(e) = self.controller.flip_camera(view) {
                    log_recovered("Camera flip failed", &e);
                }
            }
            CaptureIntent::CancelTapped => {
                self.controller.cancel(view);
                return Some(CaptureOutcome::Cancelled);
            }
        }
        None
    }
}
