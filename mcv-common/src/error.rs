//! Common error types for MCV

use thiserror::Error;

/// Common result type for MCV operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across MCV crates
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP client construction error (wraps reqwest::Error)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Catalogue fetch gave up after the configured number of attempts
    #[error("Catalogue fetch failed after {attempts} attempts: {last_error}")]
    RetriesExhausted { attempts: u32, last_error: String },
}
