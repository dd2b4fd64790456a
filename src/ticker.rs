use std::time::{Duration, Instant};

/// Default input poll interval in milliseconds
pub const DEFAULT_TICK_MS: u64 = 250;

/// Countdown granularity
pub const COUNTDOWN_PERIOD: Duration = Duration::from_secs(1);

/// Get input poll duration
pub fn tick_duration() -> Duration {
    Duration::from_millis(DEFAULT_TICK_MS)
}

/// Owned periodic handle. Exists only while the countdown runs.
#[derive(Debug)]
pub struct Ticker {
    period: Duration,
    last: Instant,
}

impl Ticker {
    pub fn start(now: Instant) -> Self {
        Self::with_period(now, COUNTDOWN_PERIOD)
    }

    pub fn with_period(now: Instant, period: Duration) -> Self {
        Self { period, last: now }
    }

    /// Number of whole periods elapsed since the previous call
    pub fn due(&mut self, now: Instant) -> u32 {
        let elapsed = now.saturating_duration_since(self.last);
        let periods = (elapsed.as_nanos() / self.period.as_nanos()) as u32;
        self.last += self.period * periods;
        periods
    }
}
