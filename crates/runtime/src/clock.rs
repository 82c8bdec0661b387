//! Virtual time line implementing [`TimerService`].
//!
//! Time only moves when the host says so. [`VirtualClock::pop_due`] hands out
//! one fired timer at a time, in due order; the host routes it and asks again,
//! so a callback that cancels a later timer is honoured before that timer is
//! considered.

use game_core::{TimerHandle, TimerService, TimerToken};

/// Shortest period a repeating timer may have.
pub const MIN_PERIOD_SECONDS: f64 = 1.0e-3;

#[derive(Clone, Debug)]
struct Entry {
    handle: TimerHandle,
    due: f64,
    period: Option<f64>,
    sequence: u64,
    token: TimerToken,
}

#[derive(Clone, Debug, Default)]
pub struct VirtualClock {
    now: f64,
    next_handle: u64,
    next_sequence: u64,
    entries: Vec<Entry>,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in seconds.
    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn pending_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.entries.iter().any(|entry| entry.handle == handle)
    }

    /// Removes and returns the earliest timer due at or before `until`,
    /// moving the clock to its due time. Repeating timers are re-armed.
    pub fn pop_due(&mut self, until: f64) -> Option<TimerToken> {
        let index = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.due <= until)
            .min_by(|(_, a), (_, b)| {
                a.due
                    .total_cmp(&b.due)
                    .then(a.sequence.cmp(&b.sequence))
            })
            .map(|(index, _)| index)?;

        let sequence = self.bump_sequence();
        let entry = &mut self.entries[index];
        self.now = self.now.max(entry.due);
        let token = entry.token;

        match entry.period {
            Some(period) => {
                entry.due += period;
                entry.sequence = sequence;
            }
            None => {
                self.entries.swap_remove(index);
            }
        }

        Some(token)
    }

    /// Moves the clock forward to `time` without firing anything.
    pub fn set_now(&mut self, time: f64) {
        if time > self.now {
            self.now = time;
        }
    }

    fn bump_sequence(&mut self) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        sequence
    }
}

impl TimerService for VirtualClock {
    fn schedule(&mut self, delay_seconds: f32, repeating: bool, token: TimerToken) -> TimerHandle {
        let delay = if delay_seconds.is_finite() {
            f64::from(delay_seconds.max(0.0))
        } else {
            0.0
        };
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        let sequence = self.bump_sequence();

        self.entries.push(Entry {
            handle,
            due: self.now + delay,
            period: repeating.then(|| delay.max(MIN_PERIOD_SECONDS)),
            sequence,
            token,
        });
        tracing::trace!(handle = handle.0, delay, repeating, timer = %token.timer, "timer scheduled");
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        match self.entries.iter().position(|entry| entry.handle == handle) {
            Some(index) => {
                self.entries.swap_remove(index);
                tracing::trace!(handle = handle.0, "timer cancelled");
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use game_core::{StageId, StageTimer};

    use super::*;

    fn token(timer: StageTimer) -> TimerToken {
        TimerToken::new(StageId(0), timer)
    }

    #[test]
    fn one_shot_fires_once_at_due_time() {
        let mut clock = VirtualClock::new();
        clock.schedule(2.0, false, token(StageTimer::Preparation));

        assert_eq!(clock.pop_due(1.9), None);
        assert_eq!(clock.pop_due(2.0), Some(token(StageTimer::Preparation)));
        assert_eq!(clock.now(), 2.0);
        assert_eq!(clock.pop_due(10.0), None);
    }

    #[test]
    fn repeating_timer_rearms() {
        let mut clock = VirtualClock::new();
        clock.schedule(0.5, true, token(StageTimer::EnemySpawn));

        let mut fired = 0;
        while clock.pop_due(2.0).is_some() {
            fired += 1;
        }
        assert_eq!(fired, 4);
        assert_eq!(clock.pending_count(), 1);
    }

    #[test]
    fn earlier_due_fires_first_and_ties_keep_schedule_order() {
        let mut clock = VirtualClock::new();
        clock.schedule(1.0, false, token(StageTimer::GameOver));
        clock.schedule(0.5, false, token(StageTimer::Preparation));
        clock.schedule(1.0, false, token(StageTimer::EnemySpawn));

        assert_eq!(clock.pop_due(5.0), Some(token(StageTimer::Preparation)));
        assert_eq!(clock.pop_due(5.0), Some(token(StageTimer::GameOver)));
        assert_eq!(clock.pop_due(5.0), Some(token(StageTimer::EnemySpawn)));
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut clock = VirtualClock::new();
        let handle = clock.schedule(1.0, true, token(StageTimer::EnemySpawn));

        assert!(clock.cancel(handle));
        assert!(!clock.cancel(handle));
        assert!(!clock.is_pending(handle));
        assert_eq!(clock.pop_due(10.0), None);
    }

    #[test]
    fn schedule_is_relative_to_now() {
        let mut clock = VirtualClock::new();
        clock.set_now(3.0);
        clock.schedule(1.0, false, token(StageTimer::Preparation));

        assert_eq!(clock.pop_due(3.5), None);
        assert!(clock.pop_due(4.0).is_some());
    }

    #[test]
    fn zero_period_repeat_still_advances() {
        let mut clock = VirtualClock::new();
        clock.schedule(0.0, true, token(StageTimer::EnemySpawn));

        assert!(clock.pop_due(0.0).is_some());
        assert_eq!(clock.pop_due(0.0), None);
    }
}
