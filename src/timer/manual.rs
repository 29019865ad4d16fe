//! Virtual-time scheduler

use std::time::Duration;

use super::{Scheduler, TimerHandle, TimerId};

#[derive(Debug)]
struct Entry {
    handle: TimerHandle,
    period: Duration,
    next_due: Duration,
}

/// Scheduler driven by an explicit virtual clock.
///
/// Nothing fires on its own: the owner repeatedly calls [`pop_due`] and
/// routes each returned handle to the screen, which keeps tick delivery
/// strictly sequential and fully deterministic.
///
/// [`pop_due`]: ManualScheduler::pop_due
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    next_generation: u64,
    entries: Vec<Entry>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time since the scheduler was created
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of live timers
    pub fn active_timers(&self) -> usize {
        self.entries.len()
    }

    /// Whether a timer for `timer` is currently scheduled
    pub fn is_scheduled(&self, timer: TimerId) -> bool {
        self.entries.iter().any(|e| e.handle.timer == timer)
    }

    /// Pop the earliest tick due at or before `deadline`.
    ///
    /// Advances virtual time to that tick and re-arms the timer for its next
    /// period. Ties are broken by scheduling order. Returns `None` once no
    /// tick is due, after moving the clock to `deadline`.
    pub fn pop_due(&mut self, deadline: Duration) -> Option<TimerHandle> {
        let index = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.next_due <= deadline)
            .min_by_key(|(_, e)| (e.next_due, e.handle.generation))
            .map(|(i, _)| i);

        match index {
            Some(i) => {
                let entry = &mut self.entries[i];
                self.now = entry.next_due;
                entry.next_due += entry.period;
                Some(entry.handle)
            }
            None => {
                if deadline > self.now {
                    self.now = deadline;
                }
                None
            }
        }
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_repeating(&mut self, timer: TimerId, period: Duration) -> TimerHandle {
        self.next_generation += 1;
        let handle = TimerHandle {
            timer,
            generation: self.next_generation,
        };
        self.entries.push(Entry {
            handle,
            period,
            next_due: self.now + period,
        });
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.entries.retain(|e| e.handle != handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECOND: Duration = Duration::from_secs(1);

    #[test]
    fn fires_in_time_order_and_rearms() {
        let mut scheduler = ManualScheduler::new();
        let a = scheduler.schedule_repeating(TimerId::Countdown, SECOND);
        let b = scheduler.schedule_repeating(TimerId::RecordingClock, 2 * SECOND);

        assert_eq!(scheduler.pop_due(2 * SECOND), Some(a));
        assert_eq!(scheduler.now(), SECOND);
        // Both due at 2s; `a` was scheduled first.
        assert_eq!(scheduler.pop_due(2 * SECOND), Some(a));
        assert_eq!(scheduler.pop_due(2 * SECOND), Some(b));
        assert_eq!(scheduler.pop_due(2 * SECOND), None);
        assert_eq!(scheduler.now(), 2 * SECOND);
    }

    #[test]
    fn cancelled_timer_never_fires_and_generations_are_unique() {
        let mut scheduler = ManualScheduler::new();
        let old = scheduler.schedule_repeating(TimerId::Countdown, SECOND);
        scheduler.cancel(old);
        let new = scheduler.schedule_repeating(TimerId::Countdown, SECOND);

        assert_ne!(old, new);
        assert_eq!(scheduler.pop_due(SECOND), Some(new));
        assert_eq!(scheduler.active_timers(), 1);

        scheduler.cancel(new);
        scheduler.cancel(new);
        assert_eq!(scheduler.pop_due(10 * SECOND), None);
        assert!(!scheduler.is_scheduled(TimerId::Countdown));
    }
}
