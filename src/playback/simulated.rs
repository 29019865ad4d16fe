//! Decoder stand-in that plays back clips written by the simulated camera

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use super::{Decoder, DecoderNotice};
use crate::capture::SimulatedClip;
use crate::{Result, RetakeError};

/// Delay before a seek is confirmed
const DEFAULT_SEEK_LATENCY: Duration = Duration::from_millis(120);

#[derive(Debug, Default)]
struct Transport {
    duration_secs: f64,
    position_secs: f64,
    playing: bool,
}

/// Simulated decoder.
///
/// A background task advances the position once a second while playing and
/// reports progress and end of media on the notice channel.
pub struct SimulatedDecoder {
    notices: mpsc::UnboundedSender<DecoderNotice>,
    transport: Arc<Mutex<Transport>>,
    seek_latency: Duration,
    seek_succeeds: bool,
    ticker: Option<JoinHandle<()>>,
}

impl SimulatedDecoder {
    pub fn new(notices: mpsc::UnboundedSender<DecoderNotice>) -> Self {
        Self {
            notices,
            transport: Arc::new(Mutex::new(Transport::default())),
            seek_latency: DEFAULT_SEEK_LATENCY,
            seek_succeeds: true,
            ticker: None,
        }
    }

    pub fn with_seek_latency(mut self, latency: Duration) -> Self {
        self.seek_latency = latency;
        self
    }

    /// Make every seek report failure
    pub fn with_failing_seeks(mut self) -> Self {
        self.seek_succeeds = false;
        self
    }

    pub fn position_secs(&self) -> f64 {
        self.transport
            .lock()
            .map(|t| t.position_secs)
            .unwrap_or_default()
    }

    pub fn is_playing(&self) -> bool {
        self.transport.lock().map(|t| t.playing).unwrap_or(false)
    }

    fn spawn_ticker(&mut self) {
        if let Some(task) = self.ticker.take() {
            task.abort();
        }

        let transport = self.transport.clone();
        let notices = self.notices.clone();
        self.ticker = Some(tokio::spawn(async move {
            let period = Duration::from_secs(1);
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let notice = match transport.lock() {
                    Ok(mut t) if t.playing => advance(&mut t),
                    Ok(_) => None,
                    Err(_) => break,
                };
                if let Some(notice) = notice {
                    if notices.send(notice).is_err() {
                        break;
                    }
                }
            }
        }));
    }
}

/// Move one second forward and describe what happened
fn advance(transport: &mut Transport) -> Option<DecoderNotice> {
    transport.position_secs = (transport.position_secs + 1.0).min(transport.duration_secs);
    if transport.position_secs >= transport.duration_secs {
        transport.playing = false;
        Some(DecoderNotice::Ended)
    } else {
        Some(DecoderNotice::Progress(
            transport.position_secs / transport.duration_secs,
        ))
    }
}

impl Decoder for SimulatedDecoder {
    fn load(&mut self, path: &Path) -> Result<f64> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            RetakeError::Playback(format!("Could not open {}: {}", path.display(), e))
        })?;
        let clip: SimulatedClip = serde_json::from_str(&content).map_err(|e| {
            RetakeError::Playback(format!("{} is not a playable clip: {}", path.display(), e))
        })?;

        if let Ok(mut t) = self.transport.lock() {
            *t = Transport {
                duration_secs: clip.duration_secs.max(0.0),
                position_secs: 0.0,
                playing: false,
            };
        }
        self.spawn_ticker();

        tracing::debug!("Loaded simulated clip of {:.1}s", clip.duration_secs);
        Ok(clip.duration_secs)
    }

    fn play(&mut self) {
        if let Ok(mut t) = self.transport.lock() {
            t.playing = true;
        }
    }

    fn pause(&mut self) {
        if let Ok(mut t) = self.transport.lock() {
            t.playing = false;
        }
    }

    fn seek(&mut self, to_secs: u64) {
        if self.seek_succeeds {
            if let Ok(mut t) = self.transport.lock() {
                t.position_secs = (to_secs as f64).min(t.duration_secs);
            }
        }

        let notices = self.notices.clone();
        let latency = self.seek_latency;
        let completed = self.seek_succeeds;
        tokio::spawn(async move {
            tokio::time::sleep(latency).await;
            let _ = notices.send(DecoderNotice::SeekCompleted(completed));
        });
    }

    fn unload(&mut self) {
        if let Some(task) = self.ticker.take() {
            task.abort();
        }
        if let Ok(mut t) = self.transport.lock() {
            *t = Transport::default();
        }
    }

    fn backend_name(&self) -> &'static str {
        "simulated"
    }
}

impl Drop for SimulatedDecoder {
    fn drop(&mut self) {
        if let Some(task) = self.ticker.take() {
            task.abort();
        }
    }
}
