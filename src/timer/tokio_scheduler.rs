//! Real-time scheduler backed by tokio intervals

use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use super::{Scheduler, TimerHandle, TimerId};

/// Receiving end for ticks produced by a [`TokioScheduler`]
pub type TickReceiver = mpsc::UnboundedReceiver<TimerHandle>;

/// Scheduler that spawns one interval task per timer.
///
/// Ticks are sent down a channel and handled by the screen's event loop, so
/// coordinators still run on a single logical context. Cancelling aborts the
/// task; a tick already queued in the channel is discarded by the coordinator
/// because its handle no longer matches.
pub struct TokioScheduler {
    tx: mpsc::UnboundedSender<TimerHandle>,
    tasks: HashMap<TimerHandle, JoinHandle<()>>,
    next_generation: u64,
}

impl TokioScheduler {
    /// Create a scheduler and the receiver its ticks arrive on.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new() -> (Self, TickReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                tx,
                tasks: HashMap::new(),
                next_generation: 0,
            },
            rx,
        )
    }

    /// Number of live timer tasks
    pub fn active_timers(&self) -> usize {
        self.tasks.len()
    }

    /// Cancel every timer
    pub fn cancel_all(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_repeating(&mut self, timer: TimerId, period: Duration) -> TimerHandle {
        self.next_generation += 1;
        let handle = TimerHandle {
            timer,
            generation: self.next_generation,
        };

        let tx = self.tx.clone();
        let task = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if tx.send(handle).is_err() {
                    break;
                }
            }
        });

        tracing::debug!("Scheduled {:?} timer (generation {})", timer, handle.generation);
        self.tasks.insert(handle, task);
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if let Some(task) = self.tasks.remove(&handle) {
            task.abort();
            tracing::debug!(
                "Cancelled {:?} timer (generation {})",
                handle.timer,
                handle.generation
            );
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn first_tick_arrives_after_one_period() {
        let (mut scheduler, mut rx) = TokioScheduler::new();
        let start = Instant::now();
        let handle = scheduler.schedule_repeating(TimerId::Countdown, Duration::from_secs(1));

        assert_eq!(rx.recv().await, Some(handle));
        assert_eq!(start.elapsed(), Duration::from_secs(1));
        assert_eq!(rx.recv().await, Some(handle));
        assert_eq!(start.elapsed(), Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_timer_stops_sending() {
        let (mut scheduler, mut rx) = TokioScheduler::new();
        let old = scheduler.schedule_repeating(TimerId::PlaybackClock, Duration::from_secs(1));
        scheduler.cancel(old);
        let new = scheduler.schedule_repeating(TimerId::PlaybackClock, Duration::from_secs(1));

        assert_eq!(rx.recv().await, Some(new));
        assert_eq!(scheduler.active_timers(), 1);
    }
}
