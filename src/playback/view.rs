//! What the playback screen shows

/// Playback screen surface driven by [`PlaybackController`].
///
/// [`PlaybackController`]: crate::playback::PlaybackController
pub trait PlaybackView {
    fn set_duration_label(&mut self, label: &str);

    fn set_position_label(&mut self, label: &str);

    /// Move the seek control, `fraction` in `[0, 1]`
    fn set_scrubber(&mut self, fraction: f64);

    /// The play icon is shown while paused and hidden while playing
    fn show_play_icon(&mut self, visible: bool);

    fn present_error(&mut self, message: &str);

    fn dismiss(&mut self);
}
