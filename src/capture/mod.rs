//! Camera and microphone capture collaborator
//!
//! Recording, encoding and torch hardware live behind [`CaptureDevice`].
//! Completions the device finishes later (the written clip) come back to the
//! capture screen as a [`CaptureNotice`].

mod simulated;

pub use simulated::{SimulatedCamera, SimulatedClip};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::Result;

/// Which sensor the preview and recording use
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum CameraFacing {
    #[default]
    Front,
    Back,
}

impl CameraFacing {
    pub fn flipped(self) -> Self {
        match self {
            CameraFacing::Front => CameraFacing::Back,
            CameraFacing::Back => CameraFacing::Front,
        }
    }

    /// The torch only exists next to the back sensor
    pub fn has_torch(self) -> bool {
        matches!(self, CameraFacing::Back)
    }
}

/// Camera/microphone authorization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
    Restricted,
}

/// Completion reported by the capture device after the fact
#[derive(Debug)]
pub enum CaptureNotice {
    /// The recording was finalized (or failed to be)
    RecordingFinished(Result<PathBuf>),
}

/// Capture backend
pub trait CaptureDevice {
    /// Ask for camera and microphone access
    fn request_permission(&mut self) -> PermissionStatus;

    /// Wire the preview and movie output for `facing`
    fn configure_session(&mut self, facing: CameraFacing) -> Result<()>;

    /// Begin writing a clip to `destination`. The finished file is reported
    /// with [`CaptureNotice::RecordingFinished`].
    fn start_recording(&mut self, destination: &Path) -> Result<()>;

    fn stop_recording(&mut self);

    fn set_torch(&mut self, on: bool) -> Result<()>;

    fn is_torch_active(&self) -> bool;

    /// Switch the session to the other sensor
    fn flip(&mut self, facing: CameraFacing) -> Result<()>;

    /// Capture backend name for logging
    fn backend_name(&self) -> &'static str;
}
