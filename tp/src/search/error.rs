//! Search error types

use std::time::Duration;
use thiserror::Error;

/// Errors from a single web search call
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Search request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Search timed out after {0:?}")]
    Timeout(Duration),

    #[error("{provider} API error {status}: {message}")]
    ApiError {
        provider: &'static str,
        status: u16,
        message: String,
    },

    #[error("Failed to parse search response: {0}")]
    InvalidResponse(String),

    #[error("Missing API key: set the {env} environment variable")]
    MissingApiKey { env: String },

    #[error("Unknown search provider: '{0}'. Supported: tavily, brave")]
    UnknownProvider(String),
}

impl SearchError {
    /// Map a reqwest failure, separating client-side timeouts from other network errors
    pub fn from_request(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() { SearchError::Timeout(timeout) } else { SearchError::Network(err) }
    }
}
