use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use quiz_core::model::{ContentIndex, GameInstance, IndexDocument, InstanceIndex, Language};

use super::source::{ContentSource, index_path, instance_path};
use crate::error::ContentError;

const JSON_MIME: &str = "application/json";

#[derive(Clone, Debug)]
pub struct HttpContentConfig {
    /// Root the `dict/...` paths are resolved against.
    pub base_url: Url,
    /// Per-request timeout. `None` leaves it to the HTTP client defaults.
    pub timeout: Option<Duration>,
}

impl HttpContentConfig {
    /// Parse a base URL, making sure it is treated as a directory.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::Url` if `raw` is not an absolute URL.
    pub fn new(raw: &str) -> Result<Self, ContentError> {
        let mut base_url = Url::parse(raw.trim())?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self {
            base_url,
            timeout: Some(Duration::from_secs(10)),
        })
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Content host reached over HTTP.
#[derive(Clone)]
pub struct HttpContentSource {
    client: Client,
    base_url: Url,
}

impl HttpContentSource {
    /// # Errors
    ///
    /// Returns `ContentError::Http` if the HTTP client cannot be built.
    pub fn new(config: HttpContentConfig) -> Result<Self, ContentError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// # Errors
    ///
    /// Returns `ContentError::Url` if the joined URL is invalid.
    pub fn index_url(&self, language: &Language) -> Result<Url, ContentError> {
        Ok(self.base_url.join(&index_path(language))?)
    }

    /// # Errors
    ///
    /// Returns `ContentError::Url` if the joined URL is invalid.
    pub fn instance_url(
        &self,
        language: &Language,
        index: InstanceIndex,
    ) -> Result<Url, ContentError> {
        Ok(self.base_url.join(&instance_path(language, index))?)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ContentError> {
        debug!(%url, "requesting content");
        let response = self
            .client
            .get(url.clone())
            .header(CONTENT_TYPE, JSON_MIME)
            .header(ACCEPT, JSON_MIME)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ContentError::HttpStatus {
                url: url.to_string(),
                status: response.status(),
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl ContentSource for HttpContentSource {
    async fn fetch_index(&self, language: &Language) -> Result<ContentIndex, ContentError> {
        let doc: IndexDocument = self.get_json(self.index_url(language)?).await?;
        Ok(ContentIndex::try_from(doc)?)
    }

    async fn fetch_instance(
        &self,
        language: &Language,
        index: InstanceIndex,
    ) -> Result<GameInstance, ContentError> {
        let payload: serde_json::Value = self
            .get_json(self.instance_url(language, index)?)
            .await?;
        Ok(GameInstance::new(language.clone(), index, payload))
    }
}
