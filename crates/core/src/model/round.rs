use serde::{Deserialize, Serialize};

use crate::model::content::GameInstance;

//
// ─── ROUND REPORT ──────────────────────────────────────────────────────────────
//

/// Verdict produced by the game-play component when a round ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundReport {
    pub qualified: bool,
    pub score: u64,
}

impl RoundReport {
    #[must_use]
    pub fn qualified(score: u64) -> Self {
        Self {
            qualified: true,
            score,
        }
    }

    /// A round that was not passed. Any score it carries is discarded.
    #[must_use]
    pub fn failed(score: u64) -> Self {
        Self {
            qualified: false,
            score,
        }
    }
}

//
// ─── SESSION STATE ─────────────────────────────────────────────────────────────
//

/// Running totals of a session plus the instance currently on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    accumulated_score: u64,
    round: u32,
    active_instance: Option<GameInstance>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    /// Round 1, score 0, nothing loaded.
    #[must_use]
    pub fn new() -> Self {
        Self {
            accumulated_score: 0,
            round: 1,
            active_instance: None,
        }
    }

    #[must_use]
    pub fn accumulated_score(&self) -> u64 {
        self.accumulated_score
    }

    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    #[must_use]
    pub fn active_instance(&self) -> Option<&GameInstance> {
        self.active_instance.as_ref()
    }

    pub fn set_instance(&mut self, instance: GameInstance) {
        self.active_instance = Some(instance);
    }

    pub fn clear_instance(&mut self) -> Option<GameInstance> {
        self.active_instance.take()
    }

    /// Advance or reset the totals according to a round verdict.
    ///
    /// Qualified rounds bump the round number and add their score; anything else
    /// resets the session to round 1 with no score.
    pub fn apply_report(&mut self, report: &RoundReport) {
        if report.qualified {
            self.round = self.round.saturating_add(1);
            self.accumulated_score = self.accumulated_score.saturating_add(report.score);
        } else {
            self.round = 1;
            self.accumulated_score = 0;
        }
    }
}
