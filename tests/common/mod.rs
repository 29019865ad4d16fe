#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::Duration;

use tempfile::TempDir;

use retake::capture::{CameraFacing, CaptureDevice, PermissionStatus};
use retake::countdown::CountdownPreset;
use retake::playback::{Decoder, PlaybackController, PlaybackView};
use retake::session::{CaptureView, RecordIcon, SessionController};
use retake::storage::RecordingStore;
use retake::timer::ManualScheduler;
use retake::{Result, RetakeError};

pub fn run_retake(args: &[&str]) -> Output {
    TestEnv::new().run(args)
}

pub struct TestEnv {
    home: TempDir,
    config: TempDir,
    data: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            home: tempfile::tempdir().expect("create temporary HOME dir"),
            config: tempfile::tempdir().expect("create temporary XDG config dir"),
            data: tempfile::tempdir().expect("create temporary XDG data dir"),
        }
    }

    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_retake"))
            .args(args)
            .env("HOME", self.home.path())
            .env("XDG_CONFIG_HOME", self.config.path())
            .env("XDG_DATA_HOME", self.data.path())
            .env("RETAKE_DATA_DIR", self.data.path())
            .env_remove("RUST_LOG")
            .output()
            .expect("failed to execute retake binary")
    }

    pub fn data_dir(&self) -> &Path {
        self.data.path()
    }

    pub fn config_path(&self) -> PathBuf {
        let output = self.run(&["config", "path"]);
        assert!(
            output.status.success(),
            "config path should succeed\nstdout:\n{}\nstderr:\n{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );

        let path = String::from_utf8_lossy(&output.stdout);
        PathBuf::from(path.trim())
    }

    pub fn write_config(&self, contents: &str) {
        let config_path = self.config_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).expect("create config parent directory");
        }
        std::fs::write(&config_path, contents).expect("write config file");
    }
}

/// Capture device that only records what it was asked to do
#[derive(Debug)]
pub struct FakeCamera {
    pub permission: PermissionStatus,
    pub fail_start: bool,
    pub fail_torch: bool,
    pub torch: bool,
    pub facing: Option<CameraFacing>,
    pub destination: Option<PathBuf>,
    pub recording: bool,
    pub starts: usize,
    pub stops: usize,
}

impl FakeCamera {
    pub fn new() -> Self {
        Self {
            permission: PermissionStatus::Granted,
            fail_start: false,
            fail_torch: false,
            torch: false,
            facing: None,
            destination: None,
            recording: false,
            starts: 0,
            stops: 0,
        }
    }
}

impl CaptureDevice for FakeCamera {
    fn request_permission(&mut self) -> PermissionStatus {
        self.permission
    }

    fn configure_session(&mut self, facing: CameraFacing) -> Result<()> {
        self.facing = Some(facing);
        Ok(())
    }

    fn start_recording(&mut self, destination: &Path) -> Result<()> {
        if self.fail_start {
            return Err(RetakeError::RecordingWrite("disk full".to_string()));
        }
        self.destination = Some(destination.to_path_buf());
        self.recording = true;
        self.starts += 1;
        Ok(())
    }

    fn stop_recording(&mut self) {
        if self.recording {
            self.recording = false;
            self.stops += 1;
        }
    }

    fn set_torch(&mut self, on: bool) -> Result<()> {
        if self.fail_torch {
            return Err(RetakeError::Torch("torch busy".to_string()));
        }
        self.torch = on;
        Ok(())
    }

    fn is_torch_active(&self) -> bool {
        self.torch
    }

    fn flip(&mut self, facing: CameraFacing) -> Result<()> {
        self.facing = Some(facing);
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "fake"
    }
}

/// Decoder that reports a fixed duration and records transport calls
#[derive(Debug)]
pub struct FakeDecoder {
    pub duration_secs: f64,
    pub playing: bool,
    pub seeks: Vec<u64>,
    pub loaded: Option<PathBuf>,
}

impl FakeDecoder {
    pub fn new(duration_secs: f64) -> Self {
        Self {
            duration_secs,
            playing: false,
            seeks: Vec::new(),
            loaded: None,
        }
    }
}

impl Decoder for FakeDecoder {
    fn load(&mut self, path: &Path) -> Result<f64> {
        self.loaded = Some(path.to_path_buf());
        Ok(self.duration_secs)
    }

    fn play(&mut self) {
        self.playing = true;
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn seek(&mut self, to_secs: u64) {
        self.seeks.push(to_secs);
    }

    fn unload(&mut self) {
        self.loaded = None;
    }

    fn backend_name(&self) -> &'static str {
        "fake"
    }
}

/// View that keeps every update as a `name:value` line
#[derive(Debug, Default)]
pub struct RecordingView {
    pub events: Vec<String>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, name: &str, value: impl std::fmt::Display) {
        self.events.push(format!("{}:{}", name, value));
    }

    /// Values of every event called `name`, in order
    pub fn values(&self, name: &str) -> Vec<String> {
        let prefix = format!("{}:", name);
        self.events
            .iter()
            .filter_map(|e| e.strip_prefix(&prefix).map(str::to_string))
            .collect()
    }

    pub fn last(&self, name: &str) -> Option<String> {
        self.values(name).pop()
    }

    pub fn count(&self, name: &str) -> usize {
        self.values(name).len()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl CaptureView for RecordingView {
    fn show_countdown(&mut self) {
        self.push("countdown_shown", true);
    }

    fn update_countdown(&mut self, label: &str) {
        self.push("countdown", label);
    }

    fn hide_countdown(&mut self) {
        self.push("countdown_hidden", true);
    }

    fn set_record_enabled(&mut self, enabled: bool) {
        self.push("record_enabled", enabled);
    }

    fn set_record_icon(&mut self, icon: RecordIcon) {
        self.push("record_icon", format!("{:?}", icon));
    }

    fn set_options_visible(&mut self, visible: bool) {
        self.push("options_visible", visible);
    }

    fn set_flash_visible(&mut self, visible: bool) {
        self.push("flash_visible", visible);
    }

    fn set_flash_icon(&mut self, on: bool) {
        self.push("flash", on);
    }

    fn set_countdown_preset(&mut self, preset: CountdownPreset) {
        self.push("preset", format!("{:?}", preset));
    }

    fn set_elapsed_label(&mut self, label: &str) {
        self.push("elapsed", label);
    }

    fn set_recording_indicator(&mut self, on: bool) {
        self.push("indicator", on);
    }

    fn keep_awake(&mut self, awake: bool) {
        self.push("keep_awake", awake);
    }

    fn present_settings_prompt(&mut self, message: &str) {
        self.push("settings_prompt", message);
    }

    fn present_retry_prompt(&mut self, message: &str) {
        self.push("retry_prompt", message);
    }

    fn navigate_to_playback(&mut self, path: &Path) {
        self.push("navigate", path.display());
    }

    fn dismiss(&mut self) {
        self.push("dismissed", true);
    }
}

impl PlaybackView for RecordingView {
    fn set_duration_label(&mut self, label: &str) {
        self.push("duration", label);
    }

    fn set_position_label(&mut self, label: &str) {
        self.push("position", label);
    }

    fn set_scrubber(&mut self, fraction: f64) {
        self.push("scrubber", format!("{:.2}", fraction));
    }

    fn show_play_icon(&mut self, visible: bool) {
        self.push("play_icon", visible);
    }

    fn present_error(&mut self, message: &str) {
        self.push("error", message);
    }

    fn dismiss(&mut self) {
        self.push("dismissed", true);
    }
}

pub fn capture_controller(
    dir: &Path,
    camera: FakeCamera,
    preset: CountdownPreset,
    facing: CameraFacing,
) -> SessionController<FakeCamera, ManualScheduler> {
    SessionController::new(
        camera,
        ManualScheduler::new(),
        RecordingStore::new(dir, "recording.mp4"),
        preset,
        facing,
    )
}

pub fn playback_controller(
    dir: &Path,
    decoder: FakeDecoder,
) -> PlaybackController<FakeDecoder, ManualScheduler> {
    PlaybackController::new(
        decoder,
        ManualScheduler::new(),
        RecordingStore::new(dir, "recording.mp4"),
    )
}

/// Deliver every tick due in the next `secs` seconds to the capture screen
pub fn advance_capture(
    controller: &mut SessionController<FakeCamera, ManualScheduler>,
    view: &mut RecordingView,
    secs: u64,
) -> Result<()> {
    let deadline = controller.scheduler().now() + Duration::from_secs(secs);
    while let Some(handle) = controller.scheduler_mut().pop_due(deadline) {
        controller.on_timer(handle, view)?;
    }
    Ok(())
}

/// Deliver every tick due in the next `secs` seconds to the playback screen
pub fn advance_playback(
    controller: &mut PlaybackController<FakeDecoder, ManualScheduler>,
    view: &mut RecordingView,
    secs: u64,
) {
    let deadline = controller.scheduler().now() + Duration::from_secs(secs);
    while let Some(handle) = controller.scheduler_mut().pop_due(deadline) {
        controller.on_timer(handle, view);
    }
}
