use std::fmt;

use quiz_core::model::{
    Difficulty, GameInstance, Generation, Language, RoundReport, SessionState,
};

use super::view::{AcquisitionStatus, Presentation, SessionSnapshot};
use crate::error::{ContentError, SessionError};

//
// ─── ACQUISITION TICKETS ───────────────────────────────────────────────────────
//

/// Instruction to run one acquisition cycle.
///
/// The result must be handed back to [`SessionController::finish_acquisition`]
/// together with the same generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquisitionRequest {
    pub generation: Generation,
    pub language: Language,
}

/// What happened to a finished acquisition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquisitionOutcome {
    /// The instance is now active.
    Applied,
    /// The cycle failed; the session is in the unavailable state.
    Failed,
    /// A newer cycle superseded this one; the result was dropped.
    Stale,
}

//
// ─── CONTROLLER ────────────────────────────────────────────────────────────────
//

/// Round and score bookkeeping plus acquisition sequencing for one session.
///
/// The controller performs no I/O. Each transition that needs content returns an
/// [`AcquisitionRequest`]; the caller runs the pipeline and reports back.
pub struct SessionController {
    language: Language,
    difficulty: Difficulty,
    state: SessionState,
    generation: Generation,
    status: AcquisitionStatus,
}

impl SessionController {
    /// A session at round 1 with no score and nothing loaded.
    #[must_use]
    pub fn new(language: Language, difficulty: Difficulty) -> Self {
        Self {
            language,
            difficulty,
            state: SessionState::new(),
            generation: Generation::default(),
            status: AcquisitionStatus::Idle,
        }
    }

    #[must_use]
    pub fn language(&self) -> &Language {
        &self.language
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn round(&self) -> u32 {
        self.state.round()
    }

    #[must_use]
    pub fn accumulated_score(&self) -> u64 {
        self.state.accumulated_score()
    }

    #[must_use]
    pub fn active_instance(&self) -> Option<&GameInstance> {
        self.state.active_instance()
    }

    #[must_use]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    #[must_use]
    pub fn status(&self) -> &AcquisitionStatus {
        &self.status
    }

    /// Begin a new acquisition cycle.
    ///
    /// The previous instance disappears immediately and every older cycle becomes stale.
    pub fn start_acquisition(&mut self) -> AcquisitionRequest {
        self.state.clear_instance();
        self.generation = self.generation.next();
        self.status = AcquisitionStatus::Loading;
        AcquisitionRequest {
            generation: self.generation,
            language: self.language.clone(),
        }
    }

    /// Returns true if `generation` is the cycle currently awaited.
    #[must_use]
    pub fn is_current(&self, generation: Generation) -> bool {
        generation == self.generation && self.status == AcquisitionStatus::Loading
    }

    /// Apply the result of an acquisition cycle, unless it has been superseded.
    pub fn finish_acquisition(
        &mut self,
        generation: Generation,
        result: Result<GameInstance, ContentError>,
    ) -> AcquisitionOutcome {
        if !self.is_current(generation) {
            return AcquisitionOutcome::Stale;
        }
        match result {
            Ok(instance) => {
                self.state.set_instance(instance);
                self.status = AcquisitionStatus::Ready;
                AcquisitionOutcome::Applied
            }
            Err(err) => {
                self.status = AcquisitionStatus::Unavailable {
                    reason: err.to_string(),
                };
                AcquisitionOutcome::Failed
            }
        }
    }

    /// Switch content pools. Returns the new cycle to run when the language changed.
    pub fn set_language(&mut self, language: Language) -> Option<AcquisitionRequest> {
        if language == self.language {
            return None;
        }
        self.language = language;
        Some(self.start_acquisition())
    }

    /// Update the difficulty handed to the game-play component. Never reloads content.
    ///
    /// Returns true if the value changed.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> bool {
        let changed = self.difficulty != difficulty;
        self.difficulty = difficulty;
        changed
    }

    /// Consume the report for the active round and start the next cycle.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoActiveRound` when no instance is on screen.
    pub fn on_round_complete(
        &mut self,
        report: RoundReport,
    ) -> Result<AcquisitionRequest, SessionError> {
        if self.state.clear_instance().is_none() {
            return Err(SessionError::NoActiveRound);
        }
        self.state.apply_report(&report);
        Ok(self.start_acquisition())
    }

    /// Like [`on_round_complete`](Self::on_round_complete), but only for the round
    /// presented under `generation`. Duplicate or late reports are rejected.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::StaleReport` if `generation` is not the presented round.
    pub fn complete_round(
        &mut self,
        generation: Generation,
        report: RoundReport,
    ) -> Result<AcquisitionRequest, SessionError> {
        let current = self.presented_generation();
        if current != Some(generation) {
            return Err(SessionError::StaleReport {
                reported: generation,
                current,
            });
        }
        self.on_round_complete(report)
    }

    /// Generation of the instance on screen, if any.
    #[must_use]
    pub fn presented_generation(&self) -> Option<Generation> {
        self.state.active_instance().map(|_| self.generation)
    }

    /// Restart acquisition after a failure. No-op in any other state.
    pub fn retry(&mut self) -> Option<AcquisitionRequest> {
        match self.status {
            AcquisitionStatus::Unavailable { .. } => Some(self.start_acquisition()),
            _ => None,
        }
    }

    #[must_use]
    pub fn presentation(&self) -> Option<Presentation> {
        self.snapshot().presentation()
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            generation: self.generation,
            language: self.language.clone(),
            difficulty: self.difficulty,
            round: self.state.round(),
            accumulated_score: self.state.accumulated_score(),
            status: self.status.clone(),
            instance: self.state.active_instance().cloned(),
        }
    }
}

impl fmt::Debug for SessionController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionController")
            .field("language", &self.language)
            .field("difficulty", &self.difficulty)
            .field("round", &self.state.round())
            .field("accumulated_score", &self.state.accumulated_score())
            .field("generation", &self.generation)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
