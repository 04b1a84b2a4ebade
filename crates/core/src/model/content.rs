use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::sync::Arc;
use thiserror::Error;

use crate::model::ids::InstanceIndex;
use crate::model::language::Language;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// The content index does not describe a selectable pool.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IndexBoundsError {
    #[error("content index does not list any instances")]
    Missing,

    #[error("content index lists {0} instances")]
    NotPositive(i64),

    #[error("content index lists too many instances: {0}")]
    TooLarge(i64),
}

//
// ─── INDEX ─────────────────────────────────────────────────────────────────────
//

/// Wire shape of `dict/{language}/index.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDocument {
    #[serde(default)]
    pub instances: Option<i64>,
}

/// Validated pool description for one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentIndex {
    instance_count: NonZeroU32,
}

impl ContentIndex {
    #[must_use]
    pub fn new(instance_count: NonZeroU32) -> Self {
        Self { instance_count }
    }

    /// Build an index from the raw `instances` field.
    ///
    /// # Errors
    ///
    /// Returns `IndexBoundsError` when the count is absent, zero, negative, or
    /// does not fit in a `u32`.
    pub fn from_instances(instances: Option<i64>) -> Result<Self, IndexBoundsError> {
        let raw = instances.ok_or(IndexBoundsError::Missing)?;
        if raw <= 0 {
            return Err(IndexBoundsError::NotPositive(raw));
        }
        let count = u32::try_from(raw).map_err(|_| IndexBoundsError::TooLarge(raw))?;
        NonZeroU32::new(count)
            .map(Self::new)
            .ok_or(IndexBoundsError::NotPositive(raw))
    }

    #[must_use]
    pub fn instance_count(&self) -> NonZeroU32 {
        self.instance_count
    }

    /// Returns true if `index` is a valid selection in this pool.
    #[must_use]
    pub fn contains(&self, index: InstanceIndex) -> bool {
        index.value() < self.instance_count.get()
    }
}

impl TryFrom<IndexDocument> for ContentIndex {
    type Error = IndexBoundsError;

    fn try_from(doc: IndexDocument) -> Result<Self, Self::Error> {
        Self::from_instances(doc.instances)
    }
}

//
// ─── INSTANCE ──────────────────────────────────────────────────────────────────
//

/// Content for one playable round.
///
/// The payload belongs to the game-play component; the session never looks inside it.
/// It is reference counted so snapshots and presentations stay cheap to clone.
#[derive(Debug, Clone, PartialEq)]
pub struct GameInstance {
    language: Language,
    index: InstanceIndex,
    payload: Arc<serde_json::Value>,
}

impl GameInstance {
    #[must_use]
    pub fn new(language: Language, index: InstanceIndex, payload: serde_json::Value) -> Self {
        Self {
            language,
            index,
            payload: Arc::new(payload),
        }
    }

    #[must_use]
    pub fn language(&self) -> &Language {
        &self.language
    }

    #[must_use]
    pub fn index(&self) -> InstanceIndex {
        self.index
    }

    #[must_use]
    pub fn payload(&self) -> &serde_json::Value {
        &self.payload
    }
}
