use std::time::Duration;

use quiz_core::countdown::TimeoutMode;

/// Knobs for a running session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionConfig {
    pub retry: RetryPolicy,
    pub countdown: CountdownConfig,
}

/// Automatic retries for failed acquisitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            initial_backoff: Duration::from_millis(250),
            max_backoff: Duration::from_secs(4),
        }
    }
}

impl RetryPolicy {
    /// Fail on the first error.
    #[must_use]
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Delay before retry number `retry` (1-based), doubling each time.
    #[must_use]
    pub fn backoff_for(&self, retry: u32) -> Duration {
        let exponent = retry.saturating_sub(1).min(16);
        self.initial_backoff
            .saturating_mul(1 << exponent)
            .min(self.max_backoff)
    }
}

/// Countdown cadence and timeout signalling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownConfig {
    pub tick: Duration,
    pub mode: TimeoutMode,
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(50),
            mode: TimeoutMode::Once,
        }
    }
}
