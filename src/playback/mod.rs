//! Playback screen
//!
//! Loops the recorded clip, keeps the position label and the scrubber in step
//! with the decoder and deletes the clip on retake.

mod controller;
mod simulated;
mod view;

pub use controller::{PlaybackController, PlaybackState};
pub use simulated::SimulatedDecoder;
pub use view::PlaybackView;

use std::path::Path;

use crate::Result;

/// Report from the decoder that arrives after the fact
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DecoderNotice {
    /// Playback position as a fraction of the duration, roughly once a second
    Progress(f64),
    /// Outcome of the last `seek`
    SeekCompleted(bool),
    /// End of media reached
    Ended,
}

/// Video decoder backend
pub trait Decoder {
    /// Open a clip and return its duration in seconds
    fn load(&mut self, path: &Path) -> Result<f64>;

    fn play(&mut self);

    fn pause(&mut self);

    /// Start seeking; completion is reported with [`DecoderNotice::SeekCompleted`]
    fn seek(&mut self, to_secs: u64);

    /// Release the current clip
    fn unload(&mut self);

    /// Decoder backend name for logging
    fn backend_name(&self) -> &'static str;
}
