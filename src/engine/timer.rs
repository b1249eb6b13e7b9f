//! Polled timers.
//!
//! Nothing here spawns a thread or registers a callback. The owner calls into
//! the timer with the current frame time and acts on what it reports, so a
//! timer that is dropped simply stops existing.

use std::time::Duration;

use crate::utils::AppInstant;

/// One-shot timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    due: AppInstant,
}

impl Deadline {
    pub fn after(now: AppInstant, delay: Duration) -> Self {
        Self { due: now + delay }
    }

    pub fn is_due(&self, now: AppInstant) -> bool {
        now >= self.due
    }

    pub fn due(&self) -> AppInstant {
        self.due
    }
}

/// Repeating timer with a fixed period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    period: Duration,
    next_due: AppInstant,
}

impl Interval {
    const MIN_PERIOD: Duration = Duration::from_millis(1);

    /// First tick lands one full period after `now`.
    pub fn new(now: AppInstant, period: Duration) -> Self {
        let period = period.max(Self::MIN_PERIOD);
        Self {
            period,
            next_due: now + period,
        }
    }

    /// Consumes every tick that has come due by `now` and returns how many.
    /// A slow frame therefore never loses ticks.
    pub fn drain(&mut self, now: AppInstant) -> usize {
        let mut fired = 0;
        while now >= self.next_due {
            self.next_due += self.period;
            fired += 1;
        }
        fired
    }

    /// Consumes at most one due tick.
    pub fn fire_if_due(&mut self, now: AppInstant) -> bool {
        if now >= self.next_due {
            self.next_due += self.period;
            true
        } else {
            false
        }
    }

    pub fn next_due(&self) -> AppInstant {
        self.next_due
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{ms, now};

    #[test]
    fn deadline_fires_at_due_time() {
        let t0 = now();
        let d = Deadline::after(t0, ms(500));
        assert!(!d.is_due(t0 + ms(499)));
        assert!(d.is_due(t0 + ms(500)));
        assert_eq!(d.due(), t0 + ms(500));
    }

    #[test]
    fn interval_drains_missed_ticks() {
        let t0 = now();
        let mut iv = Interval::new(t0, ms(1_000));
        assert_eq!(iv.drain(t0 + ms(999)), 0);
        assert_eq!(iv.drain(t0 + ms(1_000)), 1);
        assert_eq!(iv.drain(t0 + ms(4_500)), 3);
        assert_eq!(iv.next_due(), t0 + ms(5_000));
    }

    #[test]
    fn fire_if_due_takes_one_tick() {
        let t0 = now();
        let mut iv = Interval::new(t0, ms(100));
        assert!(iv.fire_if_due(t0 + ms(350)));
        assert!(iv.fire_if_due(t0 + ms(350)));
        assert!(iv.fire_if_due(t0 + ms(350)));
        assert!(!iv.fire_if_due(t0 + ms(350)));
    }

    #[test]
    fn zero_period_is_clamped() {
        let t0 = now();
        let mut iv = Interval::new(t0, Duration::ZERO);
        assert_eq!(iv.period(), ms(1));
        assert_eq!(iv.drain(t0 + ms(3)), 3);
    }
}
