//! SearchClient trait definition

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::SearchError;

/// One web search result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub url: String,
    /// Text excerpt for the result; this is what becomes a research snippet
    pub content: String,
}

impl SearchHit {
    pub fn new(title: impl Into<String>, url: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            content: content.into(),
        }
    }
}

/// Web search capability
///
/// Returns between 0 and `max_results` hits in provider ranking order. Timeouts
/// are the implementation's concern and surface as `SearchError::Timeout`.
#[async_trait]
pub trait SearchClient: Send + Sync {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>, SearchError>;
}
