mod content;
mod ids;
mod language;
mod round;

pub use content::{ContentIndex, GameInstance, IndexBoundsError, IndexDocument};
pub use ids::{Generation, InstanceIndex};
pub use language::{Difficulty, DifficultyError, Language, LanguageError};
pub use round::{RoundReport, SessionState};
