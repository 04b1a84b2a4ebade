use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use quiz_core::model::{ContentIndex, GameInstance, InstanceIndex, Language};

use super::source::{ContentSource, index_path, instance_path};
use crate::error::ContentError;

/// A request observed by [`InMemoryContentSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentRequest {
    Index(Language),
    Instance(Language, InstanceIndex),
}

impl ContentRequest {
    /// Path this request would hit on the content host.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            ContentRequest::Index(language) => index_path(language),
            ContentRequest::Instance(language, index) => instance_path(language, *index),
        }
    }
}

#[derive(Default)]
struct Pool {
    instances: Vec<serde_json::Value>,
    index_override: Option<Option<i64>>,
    failing_index_requests: u32,
}

#[derive(Default)]
struct Inner {
    pools: HashMap<Language, Pool>,
    requests: Vec<ContentRequest>,
}

/// Content held in memory, with a request log. Used for tests and demos.
#[derive(Clone, Default)]
pub struct InMemoryContentSource {
    inner: Arc<Mutex<Inner>>,
}

impl InMemoryContentSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the pool for `language`.
    #[must_use]
    pub fn with_language(self, language: Language, instances: Vec<serde_json::Value>) -> Self {
        self.lock().pools.entry(language).or_default().instances = instances;
        self
    }

    /// Serve `instances` as the raw index count instead of the pool size.
    pub fn override_index(&self, language: &Language, instances: Option<i64>) {
        self.lock()
            .pools
            .entry(language.clone())
            .or_default()
            .index_override = Some(instances);
    }

    /// Fail the next `count` index requests for `language`.
    pub fn fail_index_requests(&self, language: &Language, count: u32) {
        self.lock()
            .pools
            .entry(language.clone())
            .or_default()
            .failing_index_requests = count;
    }

    /// Every request served so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<ContentRequest> {
        self.lock().requests.clone()
    }

    /// Number of requests made for `path`, e.g. `dict/en/1.json`.
    #[must_use]
    pub fn request_count(&self, path: &str) -> usize {
        self.lock()
            .requests
            .iter()
            .filter(|request| request.path() == path)
            .count()
    }
}

#[async_trait]
impl ContentSource for InMemoryContentSource {
    async fn fetch_index(&self, language: &Language) -> Result<ContentIndex, ContentError> {
        let mut guard = self.lock();
        guard.requests.push(ContentRequest::Index(language.clone()));
        let pool = guard
            .pools
            .get_mut(language)
            .ok_or_else(|| ContentError::MissingLanguage(language.clone()))?;
        if pool.failing_index_requests > 0 {
            pool.failing_index_requests -= 1;
            return Err(ContentError::MissingLanguage(language.clone()));
        }
        let raw = match pool.index_override {
            Some(raw) => raw,
            None => Some(i64::try_from(pool.instances.len()).unwrap_or(i64::MAX)),
        };
        Ok(ContentIndex::from_instances(raw)?)
    }

    async fn fetch_instance(
        &self,
        language: &Language,
        index: InstanceIndex,
    ) -> Result<GameInstance, ContentError> {
        let mut guard = self.lock();
        guard
            .requests
            .push(ContentRequest::Instance(language.clone(), index));
        let payload = guard
            .pools
            .get(language)
            .and_then(|pool| pool.instances.get(index.value() as usize))
            .cloned()
            .ok_or_else(|| ContentError::MissingInstance {
                language: language.clone(),
                index,
            })?;
        Ok(GameInstance::new(language.clone(), index, payload))
    }
}
