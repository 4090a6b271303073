use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use serde_json::Value;
use thiserror::Error;

use crate::config::CONFIG;
use crate::query_builder::EngineQuery;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid search engine url: {0}")]
    InvalidUrl(String),

    #[error("search engine request timed out")]
    Timeout,

    #[error("search engine request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("search engine responded with {status}: {body}")]
    Rejected { status: StatusCode, body: String },

    #[error("search engine returned an unreadable response: {0}")]
    Decode(#[source] reqwest::Error),
}

impl From<reqwest::Error> for EngineError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            EngineError::Timeout
        } else {
            EngineError::Transport(err)
        }
    }
}

/// Long-lived handle to the search engine. Cheap to share behind an `Arc`;
/// the inner `reqwest::Client` pools connections across concurrent requests.
#[derive(Debug, Clone)]
pub struct EngineClient {
    http: Client,
    base_url: Url,
    index: String,
}

impl EngineClient {
    pub fn new(host: &str, index: &str, timeout: Duration) -> Result<Self, EngineError> {
        let base_url = Url::parse(host).map_err(|e| EngineError::InvalidUrl(format!("{host}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(EngineError::InvalidUrl(host.to_string()));
        }

        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(EngineError::Transport)?;

        Ok(Self {
            http,
            base_url,
            index: index.to_string(),
        })
    }

    /// Create a client using environment configuration
    pub fn from_config() -> Result<Self, EngineError> {
        Self::new(
            &CONFIG.elasticsearch_host,
            &CONFIG.elasticsearch_index,
            CONFIG.engine_timeout,
        )
    }

    pub fn index(&self) -> &str {
        &self.index
    }

    fn search_url(&self) -> Result<Url, EngineError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| EngineError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push(&self.index)
            .push("_search");
        Ok(url)
    }

    /// Run a query against the configured index pattern and return the raw response body.
    pub async fn search(&self, query: &EngineQuery) -> Result<Value, EngineError> {
        let url = self.search_url()?;
        log::debug!(
            "POST {url} {}",
            serde_json::to_string(query).unwrap_or_default()
        );

        let response = self.http.post(url).json(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EngineError::Rejected { status, body });
        }

        response.json::<Value>().await.map_err(|e| {
            if e.is_timeout() {
                EngineError::Timeout
            } else {
                EngineError::Decode(e)
            }
        })
    }

    /// Check that the engine answers at all.
    pub async fn ping(&self) -> Result<(), EngineError> {
        let response = self.http.get(self.base_url.clone()).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(EngineError::Rejected { status, body })
        }
    }
}
