//! What the capture screen shows

use serde::Serialize;
use std::path::Path;

use crate::countdown::CountdownPreset;

/// Icon on the record/stop control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordIcon {
    Record,
    Stop,
}

/// Capture screen surface driven by [`SessionController`].
///
/// The controller borrows the view for the duration of each call and never
/// keeps it.
///
/// [`SessionController`]: crate::session::SessionController
pub trait CaptureView {
    fn show_countdown(&mut self);

    /// Show a countdown frame: a number of seconds or `START`
    fn update_countdown(&mut self, label: &str);

    fn hide_countdown(&mut self);

    fn set_record_enabled(&mut self, enabled: bool);

    fn set_record_icon(&mut self, icon: RecordIcon);

    /// Countdown preset, flip and cancel controls
    fn set_options_visible(&mut self, visible: bool);

    fn set_flash_visible(&mut self, visible: bool);

    fn set_flash_icon(&mut self, on: bool);

    fn set_countdown_preset(&mut self, preset: CountdownPreset);

    fn set_elapsed_label(&mut self, label: &str);

    fn set_recording_indicator(&mut self, on: bool);

    /// Keep the display from sleeping
    fn keep_awake(&mut self, awake: bool);

    /// Ask the user to grant access from the system settings
    fn present_settings_prompt(&mut self, message: &str);

    fn present_retry_prompt(&mut self, message: &str);

    fn navigate_to_playback(&mut self, path: &Path);

    fn dismiss(&mut self);
}
