//! Remaining-time display and timeout detection for round deadlines.
//!
//! This module is pure: callers feed it "now" on every tick. The periodic
//! schedule itself lives with whoever owns the timer's lifetime.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Shown once the deadline has passed.
pub const EXPIRED_DISPLAY: &str = "00:00:000";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown timeout mode: {0} (expected `once` or `repeat`)")]
pub struct TimeoutModeError(pub String);

/// Format remaining milliseconds as `MM:SS:mmm`.
///
/// Each field is rounded on its own: minutes are `round(ms / 60000)`, seconds are
/// `round((ms / 1000) % 60)` and millis are `round(ms % 1000)`. The minutes field is
/// not capped. Negative input renders [`EXPIRED_DISPLAY`].
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn format_remaining(remaining_ms: i64) -> String {
    if remaining_ms < 0 {
        return EXPIRED_DISPLAY.to_string();
    }
    let ms = remaining_ms as f64;
    let millis = (ms % 1000.0).round() as u64;
    let seconds = ((ms / 1000.0) % 60.0).round() as u64;
    let minutes = (ms / 60_000.0).round() as u64;
    format!("{minutes:02}:{seconds:02}:{millis:03}")
}

/// Score board line: remaining time followed by the running score.
#[must_use]
pub fn score_line(display: &str, score: u64) -> String {
    format!("{display} | {score}")
}

//
// ─── TIMEOUT MODE ──────────────────────────────────────────────────────────────
//

/// How often the timeout is signalled once the deadline has passed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeoutMode {
    /// Signal on the first expired tick only.
    #[default]
    Once,
    /// Signal on every expired tick.
    Repeat,
}

impl fmt::Display for TimeoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeoutMode::Once => f.write_str("once"),
            TimeoutMode::Repeat => f.write_str("repeat"),
        }
    }
}

impl FromStr for TimeoutMode {
    type Err = TimeoutModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "once" => Ok(TimeoutMode::Once),
            "repeat" => Ok(TimeoutMode::Repeat),
            _ => Err(TimeoutModeError(s.to_string())),
        }
    }
}

//
// ─── TIMER ─────────────────────────────────────────────────────────────────────
//

/// Result of one tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownTick {
    pub display: String,
    pub timed_out: bool,
}

/// Countdown towards a deadline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownTimer {
    deadline: DateTime<Utc>,
    mode: TimeoutMode,
    fired: bool,
}

impl CountdownTimer {
    #[must_use]
    pub fn new(deadline: DateTime<Utc>) -> Self {
        Self {
            deadline,
            mode: TimeoutMode::default(),
            fired: false,
        }
    }

    #[must_use]
    pub fn with_mode(mut self, mode: TimeoutMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn deadline(&self) -> DateTime<Utc> {
        self.deadline
    }

    #[must_use]
    pub fn mode(&self) -> TimeoutMode {
        self.mode
    }

    /// Whether the timeout has been signalled since the deadline was last set.
    #[must_use]
    pub fn has_fired(&self) -> bool {
        self.fired
    }

    /// Move the deadline. Re-arms the timeout.
    pub fn set_deadline(&mut self, deadline: DateTime<Utc>) {
        self.deadline = deadline;
        self.fired = false;
    }

    /// `deadline - now`; negative once the deadline has passed.
    #[must_use]
    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        self.deadline - now
    }

    #[must_use]
    pub fn remaining_ms(&self, now: DateTime<Utc>) -> i64 {
        self.remaining(now).num_milliseconds()
    }

    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.remaining_ms(now) < 0
    }

    #[must_use]
    pub fn display(&self, now: DateTime<Utc>) -> String {
        format_remaining(self.remaining_ms(now))
    }

    /// Recompute the display and decide whether this tick signals a timeout.
    pub fn tick(&mut self, now: DateTime<Utc>) -> CountdownTick {
        let remaining = self.remaining_ms(now);
        let timed_out = remaining < 0
            && match self.mode {
                TimeoutMode::Once => !self.fired,
                TimeoutMode::Repeat => true,
            };
        if timed_out {
            self.fired = true;
        }
        CountdownTick {
            display: format_remaining(remaining),
            timed_out,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn negative_remaining_renders_zeroes() {
        assert_eq!(format_remaining(-1), "00:00:000");
        assert_eq!(format_remaining(-90_000), "00:00:000");
    }

    #[test]
    fn formats_minutes_seconds_millis() {
        assert_eq!(format_remaining(61_234), "01:01:234");
        assert_eq!(format_remaining(0), "00:00:000");
        assert_eq!(format_remaining(5_007), "00:05:007");
    }

    #[test]
    fn fields_round_independently() {
        // 29.999 s: seconds round up to 30 while minutes round down to 0.
        assert_eq!(format_remaining(29_999), "00:30:999");
        // 1.5 minutes round up to 2.
        assert_eq!(format_remaining(90_000), "02:30:000");
        // 59.6 s leaves the seconds field at 60.
        assert_eq!(format_remaining(59_600), "01:60:600");
    }

    #[test]
    fn minutes_widen_past_two_digits() {
        assert_eq!(format_remaining(100 * 60_000), "100:00:000");
    }

    #[test]
    fn score_line_matches_board_layout() {
        assert_eq!(score_line("00:10:000", 40), "00:10:000 | 40");
    }

    #[test]
    fn timeout_mode_parses() {
        assert_eq!("once".parse::<TimeoutMode>().unwrap(), TimeoutMode::Once);
        assert_eq!(
            " Repeat ".parse::<TimeoutMode>().unwrap(),
            TimeoutMode::Repeat
        );
        assert!("twice".parse::<TimeoutMode>().is_err());
        assert_eq!(TimeoutMode::default(), TimeoutMode::Once);
    }

    #[test]
    fn tick_before_deadline_does_not_time_out() {
        let now = fixed_now();
        let mut timer = CountdownTimer::new(now + Duration::milliseconds(61_234));
        let tick = timer.tick(now);
        assert_eq!(tick.display, "01:01:234");
        assert!(!tick.timed_out);
    }

    #[test]
    fn exact_deadline_is_not_expired() {
        let now = fixed_now();
        let mut timer = CountdownTimer::new(now);
        assert!(!timer.tick(now).timed_out);
        assert!(timer.tick(now + Duration::milliseconds(1)).timed_out);
    }

    #[test]
    fn once_mode_fires_a_single_time() {
        let now = fixed_now();
        let mut timer = CountdownTimer::new(now);
        let fired = (1..=5)
            .map(|step| timer.tick(now + Duration::milliseconds(50 * step)))
            .filter(|tick| tick.timed_out)
            .count();
        assert_eq!(fired, 1);
        assert!(timer.has_fired());
    }

    #[test]
    fn repeat_mode_fires_every_expired_tick() {
        let now = fixed_now();
        let mut timer = CountdownTimer::new(now).with_mode(TimeoutMode::Repeat);
        let fired = (1..=5)
            .map(|step| timer.tick(now + Duration::milliseconds(50 * step)))
            .filter(|tick| tick.timed_out)
            .count();
        assert_eq!(fired, 5);
    }

    #[test]
    fn set_deadline_rearms() {
        let now = fixed_now();
        let mut timer = CountdownTimer::new(now - Duration::seconds(1));
        assert!(timer.tick(now).timed_out);
        assert!(!timer.tick(now).timed_out);

        timer.set_deadline(now + Duration::seconds(1));
        assert!(!timer.has_fired());
        assert!(!timer.tick(now).timed_out);
        assert!(timer.tick(now + Duration::seconds(2)).timed_out);
    }
}
