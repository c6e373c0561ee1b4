//! Tick timing.
//!
//! [`Clock`] turns elapsed wall time into the normalised `delta` every
//! movement is scaled by. [`Ticker`] is the single fixed-period time source
//! a real-time host paces [`Simulation::step`](crate::simulation::Simulation::step)
//! with.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Converts elapsed time into normalised tick deltas.
///
/// ```
/// use archer_core::clock::Clock;
/// use std::time::Duration;
///
/// let clock = Clock::new(30);
/// assert_eq!(clock.delta(Duration::from_millis(30)), 1.0);
/// assert_eq!(clock.delta(Duration::from_millis(45)), 1.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clock {
    period_ms: u64,
}

impl Clock {
    /// A clock with the given tick period.
    #[must_use]
    pub const fn new(period_ms: u64) -> Self {
        Self { period_ms }
    }

    /// Configured tick period.
    #[must_use]
    pub const fn period(&self) -> Duration {
        Duration::from_millis(self.period_ms)
    }

    /// `elapsed / period`: `1.0` for an on-schedule tick.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn delta(&self, elapsed: Duration) -> f64 {
        millis(elapsed) / self.period_ms as f64
    }
}

/// `elapsed` in fractional milliseconds. Whole milliseconds convert exactly.
#[must_use]
// Nanosecond counts stay exact in f64 for sessions shorter than 104 days.
#[allow(clippy::cast_precision_loss)]
pub fn millis(elapsed: Duration) -> f64 {
    elapsed.as_nanos() as f64 / 1_000_000.0
}

/// Fixed-period pacing for a real-time loop.
#[derive(Debug)]
pub struct Ticker {
    period: Duration,
    last: Instant,
}

impl Ticker {
    /// Starts a ticker whose first period begins now.
    #[must_use]
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            last: Instant::now(),
        }
    }

    /// Sleeps until one period has passed since the previous tick and
    /// returns the time actually elapsed.
    ///
    /// An overrun period returns immediately with the longer elapsed time,
    /// so the next delta stretches to cover it.
    pub fn wait_next(&mut self) -> Duration {
        let busy = self.last.elapsed();
        if busy < self.period {
            std::thread::sleep(self.period - busy);
        } else {
            tracing::warn!(
                elapsed_ms = busy.as_secs_f64() * 1000.0,
                budget_ms = self.period.as_secs_f64() * 1000.0,
                "tick exceeded time budget"
            );
        }
        let now = Instant::now();
        let elapsed = now - self.last;
        self.last = now;
        elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_is_normalised_by_period() {
        let clock = Clock::new(30);
        assert_eq!(clock.delta(Duration::ZERO), 0.0);
        assert!((clock.delta(Duration::from_millis(60)) - 2.0).abs() < 1e-12);
        assert_eq!(clock.period(), Duration::from_millis(30));
    }

    #[test]
    fn ticker_waits_at_least_one_period() {
        let mut ticker = Ticker::new(Duration::from_millis(5));
        let elapsed = ticker.wait_next();
        assert!(elapsed >= Duration::from_millis(5));
    }

    #[test]
    fn overrun_returns_the_longer_elapsed_time() {
        let mut ticker = Ticker::new(Duration::from_millis(1));
        std::thread::sleep(Duration::from_millis(10));
        let elapsed = ticker.wait_next();
        assert!(elapsed >= Duration::from_millis(10));
    }
}
