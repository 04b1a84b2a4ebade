use async_trait::async_trait;

use quiz_core::model::{ContentIndex, GameInstance, InstanceIndex, Language};

use crate::error::ContentError;

/// Read access to the static content host.
///
/// Implementations fetch fresh data on every call; the session relies on the index
/// being re-read for each acquisition cycle.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Fetch the pool description for `language`.
    ///
    /// # Errors
    ///
    /// Returns `ContentError` if the index cannot be fetched or parsed, or if it does
    /// not describe at least one instance.
    async fn fetch_index(&self, language: &Language) -> Result<ContentIndex, ContentError>;

    /// Fetch the instance at `index` for `language`.
    ///
    /// # Errors
    ///
    /// Returns `ContentError` if the instance cannot be fetched or is not valid JSON.
    async fn fetch_instance(
        &self,
        language: &Language,
        index: InstanceIndex,
    ) -> Result<GameInstance, ContentError>;
}

/// Relative location of a language's index document.
#[must_use]
pub fn index_path(language: &Language) -> String {
    format!("dict/{language}/index.json")
}

/// Relative location of one game instance document.
#[must_use]
pub fn instance_path(language: &Language, index: InstanceIndex) -> String {
    format!("dict/{language}/{index}.json")
}
