use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LanguageError {
    #[error("language code cannot be empty")]
    Empty,

    #[error("language code is too long: {len} > {max}")]
    TooLong { len: usize, max: usize },

    #[error("language code contains an invalid character: {0:?}")]
    InvalidChar(char),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown difficulty: {0}")]
pub struct DifficultyError(pub String);

//
// ─── LANGUAGE ──────────────────────────────────────────────────────────────────
//

/// Code selecting a content pool, e.g. `en` or `da`.
///
/// The code ends up as a path segment of the content URLs, so it is restricted to
/// ASCII alphanumerics, `-` and `_`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Language(String);

impl Language {
    pub const MAX_LEN: usize = 16;

    /// Validate and wrap a language code.
    ///
    /// # Errors
    ///
    /// Returns `LanguageError` if the code is empty, too long, or contains characters
    /// that are not safe inside a URL path segment.
    pub fn new(code: impl Into<String>) -> Result<Self, LanguageError> {
        let code = code.into();
        let trimmed = code.trim();
        if trimmed.is_empty() {
            return Err(LanguageError::Empty);
        }
        let len = trimmed.chars().count();
        if len > Self::MAX_LEN {
            return Err(LanguageError::TooLong {
                len,
                max: Self::MAX_LEN,
            });
        }
        if let Some(bad) = trimmed
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(LanguageError::InvalidChar(bad));
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Language {
    type Err = LanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Language {
    type Error = LanguageError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Language> for String {
    fn from(value: Language) -> Self {
        value.0
    }
}

//
// ─── DIFFICULTY ────────────────────────────────────────────────────────────────
//

/// Difficulty policy handed to the game-play component.
///
/// The session only stores and forwards it; changing it never reloads content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = DifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "normal" => Ok(Difficulty::Normal),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(DifficultyError(s.to_string())),
        }
    }
}
