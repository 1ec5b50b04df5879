use std::{ops::RangeInclusive, time::Duration};

use rand::Rng;

/// Timer for injecting stray blocks onto the stack.
///
/// While enabled, elapsed time accumulates against an interval drawn
/// uniformly from the configured range. When it expires the caller drops a
/// block, the timer restarts, and a fresh interval is drawn. Disabling
/// freezes the timer without resetting it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RandomBlocks {
    enabled: bool,
    elapsed: Duration,
    interval: Duration,
    interval_range_ms: RangeInclusive<u64>,
}

impl RandomBlocks {
    pub fn new<R>(rng: &mut R, interval_range_ms: RangeInclusive<u64>) -> Self
    where
        R: Rng + ?Sized,
    {
        let interval = draw_interval(rng, &interval_range_ms);
        Self {
            enabled: false,
            elapsed: Duration::ZERO,
            interval,
            interval_range_ms,
        }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Time left until the next injection.
    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.interval.saturating_sub(self.elapsed)
    }

    /// Advances the timer and returns whether a block is due.
    ///
    /// Does nothing while disabled.
    pub fn advance<R>(&mut self, rng: &mut R, dt: Duration) -> bool
    where
        R: Rng + ?Sized,
    {
        if !self.enabled {
            return false;
        }
        self.elapsed += dt;
        if self.elapsed < self.interval {
            return false;
        }
        self.elapsed = Duration::ZERO;
        self.interval = draw_interval(rng, &self.interval_range_ms);
        true
    }
}

fn draw_interval<R>(rng: &mut R, range_ms: &RangeInclusive<u64>) -> Duration
where
    R: Rng + ?Sized,
{
    Duration::from_millis(rng.random_range(range_ms.clone()))
}
