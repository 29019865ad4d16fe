//! The single recording file kept between capture and review

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::Settings;
use crate::{Result, RetakeError};

/// Fixed-name recording file in the app-private data directory
#[derive(Debug, Clone)]
pub struct RecordingStore {
    path: PathBuf,
}

impl RecordingStore {
    pub fn new(dir: &Path, file_name: &str) -> Self {
        Self {
            path: dir.join(file_name),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            path: settings.recording_path(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Make room for a new recording and return where it should be written.
    ///
    /// Any previous clip is removed first; failing to remove it is a
    /// recording write error.
    pub fn prepare(&self) -> Result<PathBuf> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        match std::fs::remove_file(&self.path) {
            Ok(()) => info!("Removed previous recording at {}", self.path.display()),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                return Err(RetakeError::RecordingWrite(format!(
                    "Could not replace {}: {}",
                    self.path.display(),
                    e
                )));
            }
        }

        Ok(self.path.clone())
    }

    /// Delete the recording on retake. Returns whether a file was removed.
    pub fn discard(&self) -> Result<bool> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                info!("Deleted recording at {}", self.path.display());
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!("No recording to delete at {}", self.path.display());
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }
}
