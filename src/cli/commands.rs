//! CLI command implementations

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::capture::{CameraFacing, SimulatedCamera, SimulatedClip};
use crate::cli::args::{ConfigCommand, SimulateArgs};
use crate::cli::view::TerminalView;
use crate::clock::format_ms;
use crate::config::Settings;
use crate::playback::{PlaybackController, SimulatedDecoder};
use crate::runtime::{
    CaptureIntent, CaptureOutcome, CaptureScreen, PlaybackIntent, PlaybackOutcome,
    PlaybackScreen, ProgressThrottle,
};
use crate::session::SessionController;
use crate::storage::RecordingStore;
use crate::timer::{TokioScheduler, TICK_PERIOD};

/// Margin so scripted taps land between ticks rather than on them
const TAP_MARGIN: Duration = Duration::from_millis(200);

/// Run the capture screen and then the playback screen against simulated
/// devices, tapping the controls on a fixed script.
pub async fn simulate(settings: &Settings, args: SimulateArgs) -> Result<()> {
    settings.ensure_dirs()?;

    let preset = args.countdown.unwrap_or(settings.capture.countdown);
    let facing = args.facing.unwrap_or(settings.capture.facing);
    let store = RecordingStore::from_settings(settings);
    let mut view = TerminalView::new(args.json);

    // Capture screen
    let (notice_tx, notice_rx) = mpsc::unbounded_channel();
    let (scheduler, ticks) = TokioScheduler::new();
    let controller = SessionController::new(
        SimulatedCamera::new(notice_tx),
        scheduler,
        store.clone(),
        preset,
        facing,
    );
    let (intent_tx, intent_rx) = mpsc::channel(16);
    let screen = CaptureScreen::new(controller, ticks, intent_rx, notice_rx);

    let flash = args.flash;
    let record_secs = args.record_secs;
    let script = tokio::spawn(async move {
        let taps = async {
            if flash {
                intent_tx.send(CaptureIntent::FlashTapped).await.ok();
            }
            intent_tx.send(CaptureIntent::RecordTapped).await.ok();

            // START arrives one tick after the last countdown frame
            let countdown = TICK_PERIOD * (preset.seconds() + 1);
            tokio::time::sleep(countdown + Duration::from_secs(record_secs) + TAP_MARGIN).await;
            intent_tx.send(CaptureIntent::RecordTapped).await.ok();
        };

        tokio::select! {
            _ = taps => {}
            _ = tokio::signal::ctrl_c() => {
                intent_tx.send(CaptureIntent::CancelTapped).await.ok();
            }
        }

        // Keep the sender alive until the screen hands over to playback
        intent_tx.closed().await;
    });

    let outcome = screen.run(&mut view).await;
    script.abort();

    let path = match outcome.context("Capture screen failed")? {
        CaptureOutcome::Review(path) => path,
        CaptureOutcome::Cancelled => {
            view.note("capture cancelled");
            return Ok(());
        }
    };

    // Playback screen
    let (notice_tx, notice_rx) = mpsc::unbounded_channel();
    let (scheduler, ticks) = TokioScheduler::new();
    let controller = PlaybackController::new(SimulatedDecoder::new(notice_tx), scheduler, store);
    let (intent_tx, intent_rx) = mpsc::channel(16);
    let screen = PlaybackScreen::new(
        controller,
        ticks,
        intent_rx,
        notice_rx,
        ProgressThrottle::new(settings.progress_throttle()),
    );

    let review = Duration::from_secs(args.review_secs);
    let seek_fraction = args.seek_fraction;
    let retake = args.retake;
    let script = tokio::spawn(async move {
        let taps = async {
            let mut waited = Duration::ZERO;
            if let Some(fraction) = seek_fraction {
                let before_seek = (TICK_PERIOD + TAP_MARGIN).min(review);
                tokio::time::sleep(before_seek).await;
                waited = before_seek;
                intent_tx
                    .send(PlaybackIntent::SeekCommitted(fraction))
                    .await
                    .ok();
            }
            tokio::time::sleep(review.saturating_sub(waited)).await;

            if retake {
                intent_tx.send(PlaybackIntent::RetakeTapped).await.ok();
                intent_tx.closed().await;
            }
        };

        tokio::select! {
            _ = taps => {}
            _ = tokio::signal::ctrl_c() => {}
        }
        // Dropping the sender closes the screen with the clip kept
    });

    let outcome = screen.run(&path, &mut view).await;
    script.abort();

    match outcome.context("Playback screen failed")? {
        PlaybackOutcome::Retake => view.note("recording discarded, ready to record again"),
        PlaybackOutcome::Closed => view.note(&format!("recording kept at {}", path.display())),
    }

    Ok(())
}

#[derive(Serialize)]
struct RecordingStatus {
    path: PathBuf,
    exists: bool,
    duration: Option<String>,
    facing: Option<CameraFacing>,
    torch_used: Option<bool>,
}

/// Show the recording currently kept for review
pub fn show_status(settings: &Settings, json: bool) -> Result<()> {
    let path = settings.recording_path();
    let exists = path.exists();

    // Only clips written by the simulated camera can be described
    let clip: Option<SimulatedClip> = if exists {
        std::fs::read_to_string(&path)
            .ok()
            .and_then(|content| serde_json::from_str(&content).ok())
    } else {
        None
    };

    let status = RecordingStatus {
        path,
        exists,
        duration: clip
            .as_ref()
            .map(|c| format_ms(c.duration_secs.ceil() as u64)),
        facing: clip.as_ref().map(|c| c.facing),
        torch_used: clip.as_ref().map(|c| c.torch_used),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    if !status.exists {
        println!("No recording at {}", status.path.display());
        return Ok(());
    }

    println!("Recording: {}", status.path.display());
    if let Some(duration) = &status.duration {
        println!("  Duration: {}", duration);
    }
    if let Some(facing) = status.facing {
        println!("  Camera: {:?}", facing);
    }
    if let Some(torch) = status.torch_used {
        println!("  Torch: {}", if torch { "on" } else { "off" });
    }

    Ok(())
}

/// Handle config subcommands
pub fn config_command(settings: &Settings, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show => {
            let toml = toml::to_string_pretty(settings)?;
            println!("{}", toml);
        }
        ConfigCommand::Path => {
            let path = Settings::config_path()?;
            println!("{}", path.display());
        }
        ConfigCommand::Init { force } => {
            let path = Settings::config_path()?;
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    path.display()
                );
            }
            Settings::write_default(&path)?;
            println!("Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}
