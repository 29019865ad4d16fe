//! Application settings management

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::capture::CameraFacing;
use crate::countdown::CountdownPreset;
use crate::APP_NAME;

/// Main application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// General settings
    #[serde(default)]
    pub general: GeneralSettings,

    /// Capture screen settings
    #[serde(default)]
    pub capture: CaptureSettings,

    /// Playback screen settings
    #[serde(default)]
    pub playback: PlaybackSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralSettings {
    /// App-private directory holding the recording
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureSettings {
    /// Countdown preset selected when the capture screen opens
    #[serde(default)]
    pub countdown: CountdownPreset,

    /// Camera used when the capture screen opens
    #[serde(default)]
    pub facing: CameraFacing,

    /// Name of the recording file inside the data directory
    #[serde(default = "default_file_name")]
    pub file_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackSettings {
    /// Minimum gap between decoder progress updates reaching the screen
    #[serde(default = "default_progress_throttle_ms")]
    pub progress_throttle_ms: u64,
}

// Default value functions

fn default_data_dir() -> PathBuf {
    ProjectDirs::from("com", APP_NAME, APP_NAME)
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("~/.local/share/retake"))
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_file_name() -> String {
    "recording.mp4".to_string()
}

fn default_progress_throttle_ms() -> u64 {
    1000
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            countdown: CountdownPreset::default(),
            facing: CameraFacing::default(),
            file_name: default_file_name(),
        }
    }
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            progress_throttle_ms: default_progress_throttle_ms(),
        }
    }
}

impl Settings {
    /// Load settings from the configuration file
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            tracing::info!("No config file found, using defaults");
            let mut settings = Self::default();
            settings.apply_env_overrides();
            return Ok(settings);
        }

        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let mut settings = Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;

        settings.apply_env_overrides();

        Ok(settings)
    }

    /// Parse settings from TOML, filling in defaults for missing keys
    pub fn from_toml(content: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        let name = Path::new(&self.capture.file_name);
        if self.capture.file_name.trim().is_empty() || name.components().count() != 1 {
            anyhow::bail!(
                "capture.file_name must be a plain file name, got {:?}",
                self.capture.file_name
            );
        }
        Ok(())
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(dir) = std::env::var("RETAKE_DATA_DIR") {
            if !dir.trim().is_empty() {
                self.general.data_dir = PathBuf::from(dir);
            }
        }
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("com", APP_NAME, APP_NAME)
            .context("Could not determine config directory")?;

        let config_dir = dirs.config_dir();
        Ok(config_dir.join("config.toml"))
    }

    /// Write default configuration to a file
    pub fn write_default(path: &Path) -> Result<()> {
        let settings = Self::default();
        let content = toml::to_string_pretty(&settings)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the recording file path
    pub fn recording_path(&self) -> PathBuf {
        self.general.data_dir.join(&self.capture.file_name)
    }

    /// Minimum interval between progress updates
    pub fn progress_throttle(&self) -> Duration {
        Duration::from_millis(self.playback.progress_throttle_ms)
    }

    /// Ensure all required directories exist
    pub fn ensure_dirs(&self) -> Result<()> {
        std::fs::create_dir_all(&self.general.data_dir)?;
        Ok(())
    }
}
