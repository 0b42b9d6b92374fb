//! Web search module
//!
//! The Web-Search capability used by the research stage, plus provider clients.

use std::sync::Arc;

use tracing::debug;

mod brave;
pub mod client;
mod error;
mod tavily;

pub use brave::BraveClient;
pub use client::{SearchClient, SearchHit};
pub use error::SearchError;
pub use tavily::TavilyClient;

use crate::config::SearchConfig;

/// Create a search client based on the provider specified in config
pub fn create_client(config: &SearchConfig) -> Result<Arc<dyn SearchClient>, SearchError> {
    debug!(provider = %config.provider, "create_client: called");
    match config.provider.as_str() {
        "tavily" => Ok(Arc::new(TavilyClient::from_config(config)?)),
        "brave" => Ok(Arc::new(BraveClient::from_config(config)?)),
        other => Err(SearchError::UnknownProvider(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_client_unknown_provider() {
        let config = SearchConfig {
            provider: "serpapi".to_string(),
            ..Default::default()
        };
        let err = create_client(&config).err().unwrap();
        assert!(matches!(err, SearchError::UnknownProvider(p) if p == "serpapi"));
    }

    #[test]
    fn test_create_client_missing_key() {
        let config = SearchConfig {
            api_key_env: "TP_TEST_UNSET_SEARCH_KEY_41C".to_string(),
            ..Default::default()
        };
        let err = create_client(&config).err().unwrap();
        assert!(matches!(err, SearchError::MissingApiKey { .. }));
    }
}
