//! Event loops that run a screen on tokio
//!
//! Each screen is a single task selecting over timer ticks, collaborator
//! notices and user intents, so the controllers only ever see one event at
//! a time.

mod capture;
mod playback;
mod throttle;

pub use capture::{CaptureIntent, CaptureOutcome, CaptureScreen};
pub use playback::{PlaybackIntent, PlaybackOutcome, PlaybackScreen};
pub use throttle::ProgressThrottle;

use crate::RetakeError;

/// Log an error a screen recovered from
fn log_recovered(context: &str, err: &RetakeError) {
    match err {
        RetakeError::RecordingWrite(_) | RetakeError::Io(_) => {
            tracing::error!("{}: {}", context, err)
        }
        _ => tracing::warn!("{}: {}", context, err),
    }
}
