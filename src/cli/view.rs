//! Terminal rendering of screen updates
//!
//! Every call the controllers make on their view becomes one line on stdout,
//! either human readable or a JSON object per line.

use serde_json::{json, Value};
use std::path::Path;
use tokio::time::Instant;

use crate::countdown::CountdownPreset;
use crate::playback::PlaybackView;
use crate::session::{CaptureView, RecordIcon};

/// Prints capture and playback screen updates
pub struct TerminalView {
    json: bool,
    started: Instant,
}

impl TerminalView {
    pub fn new(json: bool) -> Self {
        Self {
            json,
            started: Instant::now(),
        }
    }

    /// Print a line that is not a screen update
    pub fn note(&mut self, message: &str) {
        self.emit("cli", "note", json!(message));
    }

    fn emit(&mut self, screen: &str, event: &str, value: Value) {
        let at = self.started.elapsed().as_secs_f64();
        if self.json {
            let line = json!({
                "at": (at * 1000.0).round() / 1000.0,
                "screen": screen,
                "event": event,
                "value": value,
            });
            println!("{}", line);
            return;
        }

        match value {
            Value::Null => println!("[{:>7.2}s] {:<8} {}", at, screen, event),
            Value::String(s) => println!("[{:>7.2}s] {:<8} {}: {}", at, screen, event, s),
            other => println!("[{:>7.2}s] {:<8} {}: {}", at, screen, event, other),
        }
    }
}

impl CaptureView for TerminalView {
    fn show_countdown(&mut self) {
        self.emit("capture", "countdown_shown", Value::Null);
    }

    fn update_countdown(&mut self, label: &str) {
        self.emit("capture", "countdown", json!(label));
    }

    fn hide_countdown(&mut self) {
        self.emit("capture", "countdown_hidden", Value::Null);
    }

    fn set_record_enabled(&mut self, enabled: bool) {
        self.emit("capture", "record_enabled", json!(enabled));
    }

    fn set_record_icon(&mut self, icon: RecordIcon) {
        self.emit("capture", "record_icon", json!(icon));
    }

    fn set_options_visible(&mut self, visible: bool) {
        self.emit("capture", "options_visible", json!(visible));
    }

    fn set_flash_visible(&mut self, visible: bool) {
        self.emit("capture", "flash_visible", json!(visible));
    }

    fn set_flash_icon(&mut self, on: bool) {
        self.emit("capture", "flash", json!(on));
    }

    fn set_countdown_preset(&mut self, preset: CountdownPreset) {
        self.emit("capture", "countdown_preset", json!(preset));
    }

    fn set_elapsed_label(&mut self, label: &str) {
        self.emit("capture", "elapsed", json!(label));
    }

    fn set_recording_indicator(&mut self, on: bool) {
        self.emit("capture", "recording_indicator", json!(on));
    }

    fn keep_awake(&mut self, awake: bool) {
        self.emit("capture", "keep_awake", json!(awake));
    }

    fn present_settings_prompt(&mut self, message: &str) {
        self.emit("capture", "settings_prompt", json!(message));
    }

    fn present_retry_prompt(&mut self, message: &str) {
        self.emit("capture", "retry_prompt", json!(message));
    }

    fn navigate_to_playback(&mut self, path: &Path) {
        self.emit("capture", "navigate", json!(path.display().to_string()));
    }

    fn dismiss(&mut self) {
        self.emit("capture", "dismissed", Value::Null);
    }
}

impl PlaybackView for TerminalView {
    fn set_duration_label(&mut self, label: &str) {
        self.emit("playback", "duration", json!(label));
    }

    fn set_position_label(&mut self, label: &str) {
        self.emit("playback", "position", json!(label));
    }

    fn set_scrubber(&mut self, fraction: f64) {
        self.emit("playback", "scrubber", json!((fraction * 1000.0).round() / 1000.0));
    }

    fn show_play_icon(&mut self, visible: bool) {
        self.emit("playback", "play_icon", json!(visible));
    }

    fn present_error(&mut self, message: &str) {
        self.emit("playback", "error", json!(message));
    }

    fn dismiss(&mut self) {
        self.emit("playback", "dismissed", Value::Null);
    }
}
