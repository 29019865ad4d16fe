//! retake - Record a short clip after a countdown and review it immediately
//!
//! The capture and playback screens are thin coordinators around a camera
//! and a decoder; this crate owns the countdown, the two clocks and the
//! state machines that tie them to the devices.

pub mod capture;
pub mod cli;
pub mod clock;
pub mod config;
pub mod countdown;
pub mod playback;
pub mod runtime;
pub mod session;
pub mod storage;
pub mod timer;

use thiserror::Error;

/// Main error type for retake
#[derive(Error, Debug)]
pub enum RetakeError {
    #[error("Permission error: {0}")]
    Permission(String),

    #[error("Device configuration error: {0}")]
    DeviceConfiguration(String),

    #[error("Recording write error: {0}")]
    RecordingWrite(String),

    #[error("Seek error: {0}")]
    Seek(String),

    #[error("Torch error: {0}")]
    Torch(String),

    #[error("Playback error: {0}")]
    Playback(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RetakeError>;

/// Application name
pub const APP_NAME: &str = "retake";
