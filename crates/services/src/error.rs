//! Shared error types for the services crate.

use std::path::PathBuf;

use thiserror::Error;

use quiz_core::model::{Generation, IndexBoundsError, InstanceIndex, Language};

/// Errors emitted by content sources.
///
/// Every variant means the requested content is unavailable; callers that only care
/// about that distinction can treat the type as a single failure.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ContentError {
    #[error("invalid content url: {0}")]
    Url(#[from] url::ParseError),
    #[error("content request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("content request to {url} failed with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("failed to read content file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("content is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    IndexBounds(#[from] IndexBoundsError),
    #[error("no content for language {0}")]
    MissingLanguage(Language),
    #[error("no content for language {language} at index {index}")]
    MissingInstance {
        language: Language,
        index: InstanceIndex,
    },
}

impl ContentError {
    /// Returns true when the content index did not describe a selectable pool.
    #[must_use]
    pub fn is_invalid_index_bounds(&self) -> bool {
        matches!(self, ContentError::IndexBounds(_))
    }
}

/// Errors emitted by session services.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no round is in progress")]
    NoActiveRound,
    #[error("round report for generation {reported} does not match the presented round {current:?}")]
    StaleReport {
        reported: Generation,
        current: Option<Generation>,
    },
    #[error("session has shut down")]
    Closed,
}
