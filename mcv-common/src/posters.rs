//! TMDB poster lookup
//!
//! Resolves a movie title to the `poster_path` of the first TMDB search
//! result. Lookup failures never reach the caller: no results, HTTP errors
//! and unparseable bodies all resolve to `None` and are logged.

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

use crate::config::PosterConfig;
use crate::Result;

const USER_AGENT: &str = concat!("MCV/", env!("CARGO_PKG_VERSION"));

/// Source of poster paths keyed by movie title
pub trait PosterLookup: Send + Sync {
    /// Poster path for `title`, or `None` when no poster could be found
    fn resolve(&self, title: &str) -> impl Future<Output = Option<String>> + Send;
}

/// TMDB client errors
#[derive(Debug, Error)]
pub enum PosterError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("API error {0}: {1}")]
    ApiError(u16, String),

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// TMDB movie search response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

/// One TMDB search hit
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchResult {
    pub id: Option<u64>,
    pub title: Option<String>,
    /// Relative poster path, e.g. `/abc123.jpg`
    pub poster_path: Option<String>,
}

/// TMDB search API client
pub struct TmdbClient {
    http_client: reqwest::Client,
    search_url: String,
    api_key: String,
}

impl TmdbClient {
    pub fn new(config: &PosterConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        if config.api_key.is_empty() {
            tracing::warn!("No TMDB API key configured, every movie will use the placeholder image");
        }

        Ok(Self {
            http_client,
            search_url: config.search_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Search TMDB for movies matching `title`
    pub async fn search(&self, title: &str) -> std::result::Result<SearchResponse, PosterError> {
        let params = [("api_key", self.api_key.as_str()), ("query", title)];

        tracing::debug!(title = %title, "Querying TMDB search API");

        let response = self
            .http_client
            .get(&self.search_url)
            .query(&params)
            .send()
            .await
            .map_err(|e| PosterError::NetworkError(e.to_string()))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(PosterError::ApiError(status.as_u16(), error_text));
        }

        response
            .json::<SearchResponse>()
            .await
            .map_err(|e| PosterError::ParseError(e.to_string()))
    }

    /// Poster path of the first search result, if any
    pub fn first_poster(response: &SearchResponse) -> Option<String> {
        response
            .results
            .first()?
            .poster_path
            .as_ref()
            .filter(|path| !path.is_empty())
            .cloned()
    }
}

impl PosterLookup for TmdbClient {
    async fn resolve(&self, title: &str) -> Option<String> {
        match self.search(title).await {
            Ok(response) => {
                let poster = Self::first_poster(&response);
                if poster.is_none() {
                    tracing::debug!(title = %title, "No TMDB poster found");
                }
                poster
            }
            Err(e) => {
                tracing::warn!(title = %title, error = %e, "TMDB poster lookup failed");
                None
            }
        }
    }
}
