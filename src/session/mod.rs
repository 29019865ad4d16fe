//! Capture screen
//!
//! Walks the record control through Idle -> CountingDown -> Recording -> Idle,
//! driving the countdown and recording clock and commanding the camera.

mod controller;
mod view;

pub use controller::{CaptureState, SessionController};
pub use view::{CaptureView, RecordIcon};
