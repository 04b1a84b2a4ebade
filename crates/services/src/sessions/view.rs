use quiz_core::model::{Difficulty, GameInstance, Generation, Language};

/// Where the current acquisition cycle stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcquisitionStatus {
    /// Nothing requested yet.
    Idle,
    /// A cycle is in flight; no instance is shown.
    Loading,
    /// The instance of the current cycle is on screen.
    Ready,
    /// The current cycle failed; the session waits for a retry or a language change.
    Unavailable { reason: String },
}

/// Everything the game-play component needs to run one round.
#[derive(Debug, Clone, PartialEq)]
pub struct Presentation {
    /// Token to hand back with the round report.
    pub generation: Generation,
    pub instance: GameInstance,
    pub difficulty: Difficulty,
    pub language: Language,
    pub accumulated_score: u64,
    pub round: u32,
}

/// Observable session state, published after every transition.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub generation: Generation,
    pub language: Language,
    pub difficulty: Difficulty,
    pub round: u32,
    pub accumulated_score: u64,
    pub status: AcquisitionStatus,
    pub instance: Option<GameInstance>,
}

impl SessionSnapshot {
    /// The round to show, if any. Never returns a presentation without an instance.
    #[must_use]
    pub fn presentation(&self) -> Option<Presentation> {
        if self.status != AcquisitionStatus::Ready {
            return None;
        }
        let instance = self.instance.clone()?;
        Some(Presentation {
            generation: self.generation,
            instance,
            difficulty: self.difficulty,
            language: self.language.clone(),
            accumulated_score: self.accumulated_score,
            round: self.round,
        })
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self.status, AcquisitionStatus::Idle | AcquisitionStatus::Loading)
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.status == AcquisitionStatus::Ready
    }

    #[must_use]
    pub fn unavailable_reason(&self) -> Option<&str> {
        match &self.status {
            AcquisitionStatus::Unavailable { reason } => Some(reason),
            _ => None,
        }
    }
}
