use chrono::{DateTime, Utc};
use quiz_core::model::{GameInstance, RoundReport};
use services::Presentation;

/// Header line of a round, e.g. `Round 2 · Score 50`.
#[must_use]
pub fn round_heading(presentation: &Presentation) -> String {
    format!(
        "Round {} · Score {}",
        presentation.round, presentation.accumulated_score
    )
}

/// Human readable payload. Falls back to compact JSON if pretty printing fails.
#[must_use]
pub fn payload_text(instance: &GameInstance) -> String {
    serde_json::to_string_pretty(instance.payload())
        .unwrap_or_else(|_| instance.payload().to_string())
}

/// A solved round scores one point per whole second left on the clock.
#[must_use]
pub fn solved_report(now: DateTime<Utc>, deadline: DateTime<Utc>) -> RoundReport {
    let remaining_secs = (deadline - now).num_seconds().max(0);
    RoundReport::qualified(u64::try_from(remaining_secs).unwrap_or(0))
}

#[must_use]
pub fn give_up_report() -> RoundReport {
    RoundReport::failed(0)
}

#[must_use]
pub fn timeout_report() -> RoundReport {
    RoundReport::failed(0)
}
