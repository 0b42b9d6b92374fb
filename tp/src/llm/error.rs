//! LLM error types

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during LLM operations
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Duration },

    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Missing API key: set the {env} environment variable")]
    MissingApiKey { env: String },

    #[error("Unknown LLM provider: '{0}'. Supported: openai (alias: groq), anthropic")]
    UnknownProvider(String),
}

impl LlmError {
    /// Map a reqwest failure, separating client-side timeouts from other network errors
    pub fn from_request(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() { LlmError::Timeout(timeout) } else { LlmError::Network(err) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = LlmError::MissingApiKey {
            env: "LLM_API_KEY".to_string(),
        };
        assert!(err.to_string().contains("LLM_API_KEY"));

        let err = LlmError::UnknownProvider("cohere".to_string());
        assert!(err.to_string().contains("cohere"));
        assert!(err.to_string().contains("openai"));
        assert!(err.to_string().contains("groq"));
    }

    #[test]
    fn test_rate_limited_message() {
        let err = LlmError::RateLimited {
            retry_after: Duration::from_secs(42),
        };
        assert!(err.to_string().contains("42s"));
    }
}
