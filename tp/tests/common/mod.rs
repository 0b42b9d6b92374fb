//! Scripted LLM and search clients shared by the integration tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use travelplanner::llm::{CompletionRequest, CompletionResponse, LlmClient, LlmError};
use travelplanner::pipeline::{PlannerSettings, RecordingObserver, TravelPlanner};
use travelplanner::prompts::PromptLoader;
use travelplanner::search::{SearchClient, SearchError, SearchHit};

/// LLM fake answering calls in order; `None` entries fail with a 500
pub struct ScriptedLlm {
    replies: Vec<Option<String>>,
    calls: AtomicUsize,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedLlm {
    pub fn new(replies: Vec<Option<&str>>) -> Self {
        Self {
            replies: replies.into_iter().map(|r| r.map(String::from)).collect(),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn ok(replies: &[&str]) -> Self {
        Self::new(replies.iter().map(|r| Some(*r)).collect())
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for ScriptedLlm {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let idx = self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request);
        match self.replies.get(idx) {
            Some(Some(text)) => Ok(CompletionResponse::text(text.clone())),
            Some(None) => Err(LlmError::ApiError {
                status: 500,
                message: "scripted failure".to_string(),
            }),
            None => Err(LlmError::InvalidResponse("script exhausted".to_string())),
        }
    }
}

/// Search fake keyed by query; queries in `failing` return a 503
#[derive(Default)]
pub struct ScriptedSearch {
    results: HashMap<String, Vec<String>>,
    failing: Vec<String>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hit(mut self, query: &str, snippets: &[&str]) -> Self {
        self.results
            .insert(query.to_string(), snippets.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn fail(mut self, query: &str) -> Self {
        self.failing.push(query.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchClient for ScriptedSearch {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>, SearchError> {
        self.calls.lock().unwrap().push(query.to_string());
        if self.failing.iter().any(|q| q == query) {
            return Err(SearchError::ApiError {
                provider: "Scripted",
                status: 503,
                message: "unavailable".to_string(),
            });
        }
        Ok(self
            .results
            .get(query)
            .map(|snippets| {
                snippets
                    .iter()
                    .take(max_results)
                    .map(|s| SearchHit::new(query, "https://example.com", s.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }
}

pub fn planner(llm: Arc<ScriptedLlm>, search: Arc<ScriptedSearch>) -> (TravelPlanner, Arc<RecordingObserver>) {
    let recorder = Arc::new(RecordingObserver::new());
    let prompts = PromptLoader::embedded_only().expect("embedded prompts compile");
    let planner =
        TravelPlanner::new(llm, search, Arc::new(prompts), PlannerSettings::default()).with_observer(recorder.clone());
    (planner, recorder)
}
