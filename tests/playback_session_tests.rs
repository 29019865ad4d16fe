mod common;

use common::{advance_playback, playback_controller, FakeDecoder, RecordingView};

use retake::playback::PlaybackState;
use retake::RetakeError;

#[test]
fn entering_shows_duration_and_counts_up() {
    let tmp = tempfile::tempdir().expect("temp dir");
    let clip = tmp.path().join("recording.mp4");
    let mut controller = playback_controller(tmp.path(), FakeDecoder::new(125.0));
    let mut view = RecordingView::new();

    controller.enter(&clip, &mut view).expect("enter playback");

    assert_eq!(view.last("duration").as_deref(), Some("02:05"));
    assert_eq!(view.last("position").as_deref(), Some("00:00"));
    assert_eq!(view.last("play_icon").as_deref(), Some("false"));
    assert!(controller.decoder().playing);
    assert_eq!(controller.decoder().loaded.as_deref(), Some(clip.as_path()));

    advance_playback(&mut controller, &mut view, 3);
    assert_eq!(view.values("position"), vec!["00:00", "00:01", "00:02", "00:03"]);
}

#[test]
fn confirmed_seek_resumes_from_the_target() {
    let tmp = tempfile::tempdir().expect("temp dir");
    let mut controller = playback_controller(tmp.path(), FakeDecoder::new(125.0));
    let mut view = RecordingView::new();
    controller
        .enter(&tmp.path().join("recording.mp4"), &mut view)
        .expect("enter");

    let target = controller.seek_committed(65.0 / 125.0);
    assert_eq!(target, 65);
    assert_eq!(controller.decoder().seeks, vec![65]);
    assert!(controller.seek_pending());

    view.clear();
    advance_playback(&mut controller, &mut view, 3);
    assert!(view.values("position").is_empty(), "no ticks while seeking");

    controller
        .on_seek_completed(true, &mut view)
        .expect("seek completed");
    advance_playback(&mut controller, &mut view, 1);
    assert_eq!(view.last("position").as_deref(), Some("01:06"));
    assert_eq!(controller.state(), PlaybackState::Playing);
}

#[test]
fn failed_seek_leaves_playback_paused() {
    let tmp = tempfile::tempdir().expect("temp dir");
    let mut controller = playback_controller(tmp.path(), FakeDecoder::new(30.0));
    let mut view = RecordingView::new();
    controller
        .enter(&tmp.path().join("recording.mp4"), &mut view)
        .expect("enter");

    controller.seek_committed(0.5);
    let result = controller.on_seek_completed(false, &mut view);

    assert!(matches!(result, Err(RetakeError::Seek(_))));
    assert_eq!(controller.state(), PlaybackState::Paused);
    assert!(!controller.decoder().playing);
    assert_eq!(view.last("play_icon").as_deref(), Some("true"));

    view.clear();
    advance_playback(&mut controller, &mut view, 3);
    assert!(view.values("position").is_empty());
}

#[test]
fn play_tap_during_seek_waits_for_the_decoder() {
    let tmp = tempfile::tempdir().expect("temp dir");
    let mut controller = playback_controller(tmp.path(), FakeDecoder::new(125.0));
    let mut view = RecordingView::new();
    controller
        .enter(&tmp.path().join("recording.mp4"), &mut view)
        .expect("enter");

    controller.toggle_play_pause(&mut view);
    controller.seek_committed(65.0 / 125.0);
    assert_eq!(controller.toggle_play_pause(&mut view), PlaybackState::Playing);
    assert!(controller.seek_pending());

    view.clear();
    advance_playback(&mut controller, &mut view, 2);
    assert!(view.values("position").is_empty(), "clock ran before the seek landed");

    let result = controller.on_seek_completed(false, &mut view);
    assert!(matches!(result, Err(RetakeError::Seek(_))));
    assert_eq!(controller.state(), PlaybackState::Paused);
    assert_eq!(view.last("play_icon").as_deref(), Some("true"));
}

#[test]
fn pause_keeps_the_position() {
    let tmp = tempfile::tempdir().expect("temp dir");
    let mut controller = playback_controller(tmp.path(), FakeDecoder::new(30.0));
    let mut view = RecordingView::new();
    controller
        .enter(&tmp.path().join("recording.mp4"), &mut view)
        .expect("enter");
    advance_playback(&mut controller, &mut view, 2);

    assert_eq!(controller.toggle_play_pause(&mut view), PlaybackState::Paused);
    assert_eq!(view.last("play_icon").as_deref(), Some("true"));
    view.clear();
    advance_playback(&mut controller, &mut view, 5);
    assert!(view.values("position").is_empty());

    assert_eq!(controller.toggle_play_pause(&mut view), PlaybackState::Playing);
    advance_playback(&mut controller, &mut view, 1);
    assert_eq!(view.values("position"), vec!["00:03"]);
}

#[test]
fn position_never_passes_the_end() {
    let tmp = tempfile::tempdir().expect("temp dir");
    let mut controller = playback_controller(tmp.path(), FakeDecoder::new(2.4));
    let mut view = RecordingView::new();
    controller
        .enter(&tmp.path().join("recording.mp4"), &mut view)
        .expect("enter");

    advance_playback(&mut controller, &mut view, 6);

    assert_eq!(view.last("position").as_deref(), Some("00:03"));
    assert_eq!(controller.position_secs(), 3);
}

#[test]
fn end_of_media_loops_to_the_start() {
    let tmp = tempfile::tempdir().expect("temp dir");
    let mut controller = playback_controller(tmp.path(), FakeDecoder::new(4.0));
    let mut view = RecordingView::new();
    controller
        .enter(&tmp.path().join("recording.mp4"), &mut view)
        .expect("enter");
    advance_playback(&mut controller, &mut view, 4);

    controller.on_playback_ended(&mut view);

    assert_eq!(view.last("position").as_deref(), Some("00:00"));
    assert_eq!(view.last("scrubber").as_deref(), Some("0.00"));
    assert_eq!(controller.decoder().seeks, vec![0]);
    assert!(controller.decoder().playing);

    // The loop's seek confirmation is not a user seek
    controller
        .on_seek_completed(true, &mut view)
        .expect("loop seek");
    assert_eq!(controller.state(), PlaybackState::Playing);

    view.clear();
    advance_playback(&mut controller, &mut view, 2);
    assert_eq!(view.values("position"), vec!["00:01", "00:02"]);
}

#[test]
fn progress_moves_the_scrubber() {
    let tmp = tempfile::tempdir().expect("temp dir");
    let mut controller = playback_controller(tmp.path(), FakeDecoder::new(10.0));
    let mut view = RecordingView::new();
    controller
        .enter(&tmp.path().join("recording.mp4"), &mut view)
        .expect("enter");

    controller.on_progress(0.5, &mut view);
    assert_eq!(view.last("scrubber").as_deref(), Some("0.50"));

    controller.on_progress(1.7, &mut view);
    assert_eq!(view.last("scrubber").as_deref(), Some("1.00"));

    // Reports far from the shown position resync it
    assert_eq!(controller.position_secs(), 10);
}

#[test]
fn progress_is_ignored_while_seeking() {
    let tmp = tempfile::tempdir().expect("temp dir");
    let mut controller = playback_controller(tmp.path(), FakeDecoder::new(10.0));
    let mut view = RecordingView::new();
    controller
        .enter(&tmp.path().join("recording.mp4"), &mut view)
        .expect("enter");

    controller.seek_committed(0.8);
    view.clear();
    controller.on_progress(0.1, &mut view);

    assert_eq!(view.count("scrubber"), 0);
    assert_eq!(controller.position_secs(), 8);
}

#[test]
fn retake_deletes_the_recording() {
    let tmp = tempfile::tempdir().expect("temp dir");
    let clip = tmp.path().join("recording.mp4");
    std::fs::write(&clip, b"clip").expect("seed recording");

    let mut controller = playback_controller(tmp.path(), FakeDecoder::new(5.0));
    let mut view = RecordingView::new();
    controller.enter(&clip, &mut view).expect("enter");

    controller.retake(&mut view).expect("retake");

    assert!(!clip.exists());
    assert_eq!(view.count("dismissed"), 1);
    assert!(!controller.decoder().playing);
    assert_eq!(controller.decoder().loaded, None);
    assert_eq!(controller.scheduler().active_timers(), 0);
}

#[test]
fn retake_without_a_file_still_dismisses() {
    let tmp = tempfile::tempdir().expect("temp dir");
    let mut controller = playback_controller(tmp.path(), FakeDecoder::new(5.0));
    let mut view = RecordingView::new();
    controller
        .enter(&tmp.path().join("recording.mp4"), &mut view)
        .expect("enter");

    controller.retake(&mut view).expect("retake");
    assert_eq!(view.count("dismissed"), 1);
}
