use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

use quiz_core::model::{ContentIndex, GameInstance, IndexDocument, InstanceIndex, Language};

use super::source::{ContentSource, index_path, instance_path};
use crate::error::ContentError;

/// Content laid out on disk exactly like the static host serves it.
#[derive(Debug, Clone)]
pub struct DirectoryContentSource {
    root: PathBuf,
}

impl DirectoryContentSource {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    async fn read_json<T: DeserializeOwned>(&self, relative: &str) -> Result<T, ContentError> {
        let path = self.root.join(relative);
        debug!(path = %path.display(), "reading content");
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|source| ContentError::Io { path, source })?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl ContentSource for DirectoryContentSource {
    async fn fetch_index(&self, language: &Language) -> Result<ContentIndex, ContentError> {
        let doc: IndexDocument = self.read_json(&index_path(language)).await?;
        Ok(ContentIndex::try_from(doc)?)
    }

    async fn fetch_instance(
        &self,
        language: &Language,
        index: InstanceIndex,
    ) -> Result<GameInstance, ContentError> {
        let payload: serde_json::Value = self.read_json(&instance_path(language, index)).await?;
        Ok(GameInstance::new(language.clone(), index, payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("dict/en")).unwrap();
        dir
    }

    #[tokio::test]
    async fn reads_index_and_instance() {
        let dir = content_dir();
        std::fs::write(dir.path().join("dict/en/index.json"), r#"{"instances": 2}"#).unwrap();
        std::fs::write(dir.path().join("dict/en/1.json"), r#"{"letters": "tsar"}"#).unwrap();

        let source = DirectoryContentSource::new(dir.path());
        let en = Language::new("en").unwrap();
        let index = source.fetch_index(&en).await.unwrap();
        assert_eq!(index.instance_count().get(), 2);

        let instance = source
            .fetch_instance(&en, InstanceIndex::new(1))
            .await
            .unwrap();
        assert_eq!(instance.payload()["letters"], "tsar");
        assert_eq!(instance.index(), InstanceIndex::new(1));
    }

    #[tokio::test]
    async fn missing_file_and_bad_json_are_errors() {
        let dir = content_dir();
        std::fs::write(dir.path().join("dict/en/index.json"), "not json").unwrap();

        let source = DirectoryContentSource::new(dir.path());
        let en = Language::new("en").unwrap();
        assert!(matches!(
            source.fetch_index(&en).await.unwrap_err(),
            ContentError::Parse(_)
        ));
        assert!(matches!(
            source
                .fetch_instance(&en, InstanceIndex::new(0))
                .await
                .unwrap_err(),
            ContentError::Io { .. }
        ));
    }

    #[tokio::test]
    async fn zero_instances_is_a_bounds_error() {
        let dir = content_dir();
        std::fs::write(dir.path().join("dict/en/index.json"), r#"{"instances": 0}"#).unwrap();

        let source = DirectoryContentSource::new(dir.path());
        let err = source
            .fetch_index(&Language::new("en").unwrap())
            .await
            .unwrap_err();
        assert!(err.is_invalid_index_bounds());
    }
}
