//! Camera stand-in for running the screens without hardware
//!
//! Instead of encoding video it writes a small JSON description of the clip,
//! which the simulated decoder reads back.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use tokio::time::Instant;

use super::{CameraFacing, CaptureDevice, CaptureNotice, PermissionStatus};
use crate::{Result, RetakeError};

/// Contents of a clip written by [`SimulatedCamera`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatedClip {
    pub duration_secs: f64,
    pub facing: CameraFacing,
    pub torch_used: bool,
}

struct ActiveClip {
    destination: PathBuf,
    started_at: Instant,
    torch_used: bool,
}

/// Simulated capture device
pub struct SimulatedCamera {
    notices: mpsc::UnboundedSender<CaptureNotice>,
    permission: PermissionStatus,
    facing: Option<CameraFacing>,
    torch: bool,
    active: Option<ActiveClip>,
}

impl SimulatedCamera {
    pub fn new(notices: mpsc::UnboundedSender<CaptureNotice>) -> Self {
        Self {
            notices,
            permission: PermissionStatus::Granted,
            facing: None,
            torch: false,
            active: None,
        }
    }

    /// Answer permission requests with `permission`
    pub fn with_permission(mut self, permission: PermissionStatus) -> Self {
        self.permission = permission;
        self
    }

    pub fn is_recording(&self) -> bool {
        self.active.is_some()
    }

    fn finish(&mut self, clip: ActiveClip) -> Result<PathBuf> {
        let facing = self.facing.unwrap_or_default();
        let description = SimulatedClip {
            duration_secs: clip.started_at.elapsed().as_secs_f64(),
            facing,
            torch_used: clip.torch_used,
        };
        let json = serde_json::to_string_pretty(&description)
            .map_err(|e| RetakeError::RecordingWrite(e.to_string()))?;
        std::fs::write(&clip.destination, json).map_err(|e| {
            RetakeError::RecordingWrite(format!(
                "Could not write {}: {}",
                clip.destination.display(),
                e
            ))
        })?;
        Ok(clip.destination)
    }
}

impl CaptureDevice for SimulatedCamera {
    fn request_permission(&mut self) -> PermissionStatus {
        self.permission
    }

    fn configure_session(&mut self, facing: CameraFacing) -> Result<()> {
        if self.permission != PermissionStatus::Granted {
            return Err(RetakeError::DeviceConfiguration(
                "No camera available without permission".to_string(),
            ));
        }
        self.facing = Some(facing);
        Ok(())
    }

    fn start_recording(&mut self, destination: &Path) -> Result<()> {
        if self.facing.is_none() {
            return Err(RetakeError::DeviceConfiguration(
                "Capture session is not configured".to_string(),
            ));
        }
        if self.active.is_some() {
            return Err(RetakeError::RecordingWrite("Already recording".to_string()));
        }
        self.active = Some(ActiveClip {
            destination: destination.to_path_buf(),
            started_at: Instant::now(),
            torch_used: self.torch,
        });
        Ok(())
    }

    fn stop_recording(&mut self) {
        let Some(clip) = self.active.take() else {
            return;
        };
        let result = self.finish(clip);
        if self.notices.send(CaptureNotice::RecordingFinished(result)).is_err() {
            tracing::warn!("Capture screen went away before the recording finished");
        }
    }

    fn set_torch(&mut self, on: bool) -> Result<()> {
        match self.facing {
            Some(facing) if facing.has_torch() => {
                self.torch = on;
                if let Some(clip) = self.active.as_mut() {
                    clip.torch_used |= on;
                }
                Ok(())
            }
            _ => Err(RetakeError::Torch("Current camera has no torch".to_string())),
        }
    }

    fn is_torch_active(&self) -> bool {
        self.torch
    }

    fn flip(&mut self, facing: CameraFacing) -> Result<()> {
        if self.active.is_some() {
            return Err(RetakeError::DeviceConfiguration(
                "Cannot flip while recording".to_string(),
            ));
        }
        if !facing.has_torch() {
            self.torch = false;
        }
        self.configure_session(facing)
    }

    fn backend_name(&self) -> &'static str {
        "simulated"
    }
}
