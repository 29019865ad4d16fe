//! Configuration module for retake
//!
//! Handles loading and managing application settings from TOML files.

mod settings;

pub use settings::{CaptureSettings, GeneralSettings, PlaybackSettings, Settings};
