use std::path::PathBuf;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use shared::domain::Session;
use tracing::debug;
use url::Url;

use crate::error::LoadError;

/// Path of the session list asset, relative to the site root.
pub const SESSIONS_ASSET_PATH: &str = "/static/tmp.json";

#[async_trait]
pub trait SessionSource: Send + Sync {
    async fn fetch_sessions(&self) -> Result<Vec<Session>, LoadError>;
}

/// Fetches the session asset over HTTP. Only `200 OK` counts as success.
#[derive(Debug, Clone)]
pub struct HttpSessionSource {
    http: Client,
    url: Url,
}

impl HttpSessionSource {
    pub fn new(site_url: &str) -> Result<Self, url::ParseError> {
        let url = Url::parse(site_url)?.join(SESSIONS_ASSET_PATH)?;
        Ok(Self::with_client(Client::new(), url))
    }

    pub fn with_client(http: Client, url: Url) -> Self {
        Self { http, url }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl SessionSource for HttpSessionSource {
    async fn fetch_sessions(&self) -> Result<Vec<Session>, LoadError> {
        let transport = |source| LoadError::Transport {
            url: self.url.to_string(),
            source,
        };

        debug!(url = %self.url, "fetching sessions");
        let response = self
            .http
            .get(self.url.clone())
            .send()
            .await
            .map_err(transport)?;
        if response.status() != StatusCode::OK {
            return Err(LoadError::Status {
                url: self.url.to_string(),
                status: response.status(),
            });
        }
        let body = response.bytes().await.map_err(transport)?;
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Reads the session asset straight from disk, with the same parse rules as
/// [`HttpSessionSource`].
#[derive(Debug, Clone)]
pub struct FileSessionSource {
    path: PathBuf,
}

impl FileSessionSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SessionSource for FileSessionSource {
    async fn fetch_sessions(&self) -> Result<Vec<Session>, LoadError> {
        debug!(path = %self.path.display(), "reading sessions");
        let raw = tokio::fs::read(&self.path)
            .await
            .map_err(|source| LoadError::Io {
                path: self.path.clone(),
                source,
            })?;
        Ok(serde_json::from_slice(&raw)?)
    }
}

#[cfg(test)]
#[path = "tests/source_tests.rs"]
mod tests;
