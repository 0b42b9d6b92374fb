//! Tavily search API client

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::{SearchClient, SearchError, SearchHit};
use crate::config::SearchConfig;

const DEFAULT_BASE_URL: &str = "https://api.tavily.com";

/// Tavily search client (recommended for AI agents)
pub struct TavilyClient {
    api_key: String,
    base_url: String,
    http: Client,
    timeout: Duration,
}

impl TavilyClient {
    pub fn from_config(config: &SearchConfig) -> Result<Self, SearchError> {
        debug!(base_url = %config.base_url, "TavilyClient::from_config: called");
        let api_key = config.api_key().ok_or_else(|| SearchError::MissingApiKey {
            env: config.api_key_env.clone(),
        })?;

        let timeout = Duration::from_millis(config.timeout_ms);
        let http = Client::builder().timeout(timeout).build()?;

        let base_url = if config.base_url.is_empty() {
            DEFAULT_BASE_URL.to_string()
        } else {
            config.base_url.trim_end_matches('/').to_string()
        };

        Ok(Self {
            api_key,
            base_url,
            http,
            timeout,
        })
    }

    fn build_request_body(&self, query: &str, max_results: usize) -> serde_json::Value {
        serde_json::json!({
            "api_key": self.api_key,
            "query": query,
            "max_results": max_results,
            "search_depth": "basic"
        })
    }
}

#[async_trait]
impl SearchClient for TavilyClient {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>, SearchError> {
        debug!(%query, %max_results, "TavilyClient::search: called");
        let url = format!("{}/search", self.base_url);

        let response = self
            .http
            .post(&url)
            .json(&self.build_request_body(query, max_results))
            .send()
            .await
            .map_err(|e| SearchError::from_request(e, self.timeout))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            debug!(%status, "TavilyClient::search: API error");
            return Err(SearchError::ApiError {
                provider: "Tavily",
                status,
                message,
            });
        }

        let body: TavilyResponse = response
            .json()
            .await
            .map_err(|e| SearchError::InvalidResponse(e.to_string()))?;

        let hits = into_hits(body, max_results);
        debug!(hit_count = hits.len(), "TavilyClient::search: success");
        Ok(hits)
    }
}

fn into_hits(body: TavilyResponse, max_results: usize) -> Vec<SearchHit> {
    body.results
        .into_iter()
        .take(max_results)
        .map(|r| SearchHit {
            title: r.title.unwrap_or_default(),
            url: r.url.unwrap_or_default(),
            content: r.content.unwrap_or_default(),
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<TavilyResult>,
}

#[derive(Debug, Deserialize)]
struct TavilyResult {
    title: Option<String>,
    url: Option<String>,
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> TavilyClient {
        TavilyClient {
            api_key: "tvly-test".to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            http: Client::new(),
            timeout: Duration::from_secs(30),
        }
    }

    #[test]
    fn test_build_request_body() {
        let body = test_client().build_request_body("Lisbon food festivals June", 2);
        assert_eq!(body["api_key"], "tvly-test");
        assert_eq!(body["query"], "Lisbon food festivals June");
        assert_eq!(body["max_results"], 2);
        assert_eq!(body["search_depth"], "basic");
    }

    #[test]
    fn test_into_hits_preserves_order_and_limit() {
        let raw = serde_json::json!({
            "query": "q",
            "results": [
                { "title": "A", "url": "https://a", "content": "first", "score": 0.9 },
                { "title": "B", "url": "https://b", "content": "second", "score": 0.8 },
                { "title": "C", "url": "https://c", "content": "third", "score": 0.7 }
            ]
        });
        let body: TavilyResponse = serde_json::from_value(raw).unwrap();

        let hits = into_hits(body, 2);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].content, "first");
        assert_eq!(hits[1].content, "second");
        assert_eq!(hits[1].url, "https://b");
    }

    #[test]
    fn test_into_hits_missing_fields() {
        let body: TavilyResponse = serde_json::from_value(serde_json::json!({ "results": [{}] })).unwrap();
        let hits = into_hits(body, 5);
        assert_eq!(hits, vec![SearchHit::new("", "", "")]);

        let body: TavilyResponse = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(into_hits(body, 5).is_empty());
    }
}
