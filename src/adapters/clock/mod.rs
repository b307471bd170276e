//! Clock adapters. Implement `ClockPort`.

use crate::domain::Instant;
use crate::ports::ClockPort;

/// Local wall clock of the host.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl ClockPort for SystemClock {
    fn now(&self) -> Instant {
        chrono::Local::now().naive_local()
    }
}

/// Wall clock that starts at a chosen instant and then advances with the
/// tokio clock. Lets a display be previewed at any time of day, and follows
/// `tokio::time::pause`/`advance` in tests.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedClock {
    start: Instant,
    anchor: tokio::time::Instant,
}

impl SimulatedClock {
    pub fn starting_at(start: Instant) -> Self {
        Self {
            start,
            anchor: tokio::time::Instant::now(),
        }
    }
}

impl ClockPort for SimulatedClock {
    fn now(&self) -> Instant {
        let elapsed = self.anchor.elapsed();
        chrono::TimeDelta::from_std(elapsed)
            .ok()
            .and_then(|d| self.start.checked_add_signed(d))
            .unwrap_or(self.start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_simulated_clock_follows_tokio_time() {
        let start = NaiveDate::from_ymd_opt(2025, 3, 7)
            .unwrap()
            .and_hms_opt(5, 59, 30)
            .unwrap();
        let clock = SimulatedClock::starting_at(start);
        assert_eq!(clock.now(), start);

        tokio::time::advance(Duration::from_secs(45)).await;
        assert_eq!(clock.now(), start + chrono::TimeDelta::seconds(45));
    }
}
