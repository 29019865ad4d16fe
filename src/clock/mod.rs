//! Elapsed-time clocks for recording and playback
//!
//! Both clocks advance on a one-second tick from the screen's scheduler and
//! hand back the label text to display.

mod format;
mod playback;
mod recording;

pub use format::{format_hms, format_ms};
pub use playback::{PlaybackClock, SeekConfirmation};
pub use recording::RecordingClock;
