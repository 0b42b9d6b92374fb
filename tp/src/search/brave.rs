//! Brave Search API client

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::{SearchClient, SearchError, SearchHit};
use crate::config::SearchConfig;

const DEFAULT_BASE_URL: &str = "https://api.search.brave.com";

/// Brave web search client
pub struct BraveClient {
    api_key: String,
    base_url: String,
    http: Client,
    timeout: Duration,
}

impl BraveClient {
    pub fn from_config(config: &SearchConfig) -> Result<Self, SearchError> {
        debug!(base_url = %config.base_url, "BraveClient::from_config: called");
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
}

#[async_trait]
impl SearchClient for BraveClient {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>, SearchError> {
        debug!(%query, %max_results, "BraveClient::search: called");
        let url = format!("{}/res/v1/web/search", self.base_url);
        let count = max_results.to_string();

        let response = self
            .http
            .get(&url)
            .header("X-Subscription-Token", self.api_key.as_str())
            .header("Accept", "application/json")
            .query(&[("q", query), ("count", count.as_str())])
            .send()
            .await
            .map_err(|e| SearchError::from_request(e, self.timeout))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            debug!(%status, "BraveClient::search: API error");
            return Err(SearchError::ApiError {
                provider: "Brave",
                status,
                message,
            });
        }

        let body: BraveResponse = response
            .json()
            .await
            .map_err(|e| SearchError::InvalidResponse(e.to_string()))?;

        Ok(into_hits(body, max_results))
    }
}

fn into_hits(body: BraveResponse, max_results: usize) -> Vec<SearchHit> {
    body.web
        .map(|w| w.results)
        .unwrap_or_default()
        .into_iter()
        .take(max_results)
        .map(|r| SearchHit {
            title: r.title.unwrap_or_default(),
            url: r.url.unwrap_or_default(),
            content: r.description.unwrap_or_default(),
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct BraveResponse {
    web: Option<BraveWeb>,
}

#[derive(Debug, Deserialize)]
struct BraveWeb {
    #[serde(default)]
    results: Vec<BraveResult>,
}

#[derive(Debug, Deserialize)]
struct BraveResult {
    title: Option<String>,
    url: Option<String>,
    description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_hits_uses_description() {
        let raw = serde_json::json!({
            "web": {
                "results": [
                    { "title": "Jazz Fest", "url": "https://jazz", "description": "Outdoor jazz all weekend" },
                    { "title": "Food Fair", "url": "https://food", "description": "Street food fair" }
                ]
            }
        });
        let body: BraveResponse = serde_json::from_value(raw).unwrap();

        let hits = into_hits(body, 2);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].content, "Outdoor jazz all weekend");
        assert_eq!(hits[1].title, "Food Fair");
    }

    #[test]
    fn test_into_hits_without_web_section() {
        let body: BraveResponse = serde_json::from_value(serde_json::json!({ "type": "search" })).unwrap();
        assert!(into_hits(body, 2).is_empty());
    }
}
