//! Catalogue fetcher
//!
//! Retrieves the base movie list from the list endpoint. An attempt fails
//! when the transport fails, the status is not success, the body is the
//! endpoint's `{ "message": ... }` error shape, or the body is not a list.
//! Failed attempts are retried with exponential backoff up to
//! `max_attempts`, after which the fetch gives up with
//! [`Error::RetriesExhausted`].

use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::model::{MovieFetchError, MovieItem};
use crate::{Error, Result};

const USER_AGENT: &str = concat!("MCV/", env!("CARGO_PKG_VERSION"));

/// Reason a single list request was rejected
#[derive(Debug, Error)]
enum AttemptError {
    #[error("network error: {0}")]
    Network(String),

    #[error("status {0}")]
    Status(u16),

    #[error("endpoint reported error: {0}")]
    Reported(String),

    #[error("malformed body: {0}")]
    Malformed(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ListResponse {
    Movies(Vec<MovieItem>),
    Failure(MovieFetchError),
}

/// Bounded retry with exponential backoff
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first one (at least 1)
    pub max_attempts: u32,
    /// Delay after the first failed attempt
    pub initial_backoff: Duration,
    /// Upper bound for any single delay
    pub max_backoff: Duration,
}

impl RetryPolicy {
    /// Delay to wait after the given failed attempt (1-based)
    pub fn backoff_for(&self, failed_attempt: u32) -> Duration {
        let exponent = failed_attempt.saturating_sub(1).min(16);
        self.initial_backoff
            .saturating_mul(1u32 << exponent)
            .min(self.max_backoff)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_backoff: Duration::from_millis(250),
            max_backoff: Duration::from_secs(5),
        }
    }
}

/// Client for the movie list endpoint
pub struct CatalogueFetcher {
    http_client: reqwest::Client,
    list_url: String,
    retry: RetryPolicy,
}

impl CatalogueFetcher {
    pub fn new(list_url: impl Into<String>, retry: RetryPolicy, timeout: Duration) -> Result<Self> {
        if retry.max_attempts == 0 {
            return Err(Error::Config("max_attempts must be at least 1".to_string()));
        }

        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http_client,
            list_url: list_url.into(),
            retry,
        })
    }

    pub fn list_url(&self) -> &str {
        &self.list_url
    }

    /// Fetch the movie list, retrying failed attempts per the retry policy
    ///
    /// The returned list is exactly what the endpoint served, in order.
    pub async fn fetch(&self) -> Result<Vec<MovieItem>> {
        let mut attempt = 0;

        loop {
            attempt += 1;

            match self.fetch_once().await {
                Ok(movies) => {
                    tracing::info!(
                        url = %self.list_url,
                        attempt,
                        count = movies.len(),
                        "Fetched movie list"
                    );
                    return Ok(movies);
                }
                Err(e) if attempt >= self.retry.max_attempts => {
                    tracing::error!(
                        url = %self.list_url,
                        attempts = attempt,
                        error = %e,
                        "Giving up on movie list"
                    );
                    return Err(Error::RetriesExhausted {
                        attempts: attempt,
                        last_error: e.to_string(),
                    });
                }
                Err(e) => {
                    let delay = self.retry.backoff_for(attempt);
                    tracing::warn!(
                        url = %self.list_url,
                        attempt,
                        error = %e,
                        "Error getting movie list, retrying in {:?}",
                        delay
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    async fn fetch_once(&self) -> std::result::Result<Vec<MovieItem>, AttemptError> {
        let response = self
            .http_client
            .get(&self.list_url)
            .send()
            .await
            .map_err(|e| AttemptError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AttemptError::Network(e.to_string()))?;

        let parsed = serde_json::from_str::<ListResponse>(&body);

        if let Ok(ListResponse::Failure(failure)) = &parsed {
            return Err(AttemptError::Reported(failure.message.clone()));
        }

        if !status.is_success() {
            return Err(AttemptError::Status(status.as_u16()));
        }

        match parsed {
            Ok(ListResponse::Movies(movies)) => Ok(movies),
            Ok(ListResponse::Failure(failure)) => Err(AttemptError::Reported(failure.message)),
            Err(e) => Err(AttemptError::Malformed(e.to_string())),
        }
    }
}
