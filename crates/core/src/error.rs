use thiserror::Error;

use crate::countdown::TimeoutModeError;
use crate::model::{DifficultyError, IndexBoundsError, LanguageError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Language(#[from] LanguageError),
    #[error(transparent)]
    Difficulty(#[from] DifficultyError),
    #[error(transparent)]
    IndexBounds(#[from] IndexBoundsError),
    #[error(transparent)]
    TimeoutMode(#[from] TimeoutModeError),
}
