//! Research stage: derive search queries and collect event snippets
//!
//! Query derivation failing fails the stage. A failing search only drops that
//! query's snippets; the remaining queries still run, in order.

use std::sync::Arc;

use tracing::{debug, warn};

use super::{response_text, trip_message};
use crate::llm::{CompletionRequest, LlmClient};
use crate::pipeline::{EventEmitter, PipelineError, StageName};
use crate::prompts::PromptLoader;
use crate::search::{SearchClient, SearchError};

/// Split model output into search queries
///
/// Lines are trimmed and blank lines dropped; at most `limit` are kept.
pub fn parse_queries(text: &str, limit: usize) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(limit)
        .map(String::from)
        .collect()
}

/// Result of one search query
#[derive(Debug)]
pub enum QueryOutcome {
    Found { query: String, snippets: Vec<String> },
    Failed { query: String, error: SearchError },
}

impl QueryOutcome {
    pub fn query(&self) -> &str {
        match self {
            QueryOutcome::Found { query, .. } | QueryOutcome::Failed { query, .. } => query,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, QueryOutcome::Failed { .. })
    }
}

/// Everything the research stage produced
#[derive(Debug)]
pub struct ResearchOutput {
    pub queries: Vec<String>,
    pub outcomes: Vec<QueryOutcome>,
}

impl ResearchOutput {
    pub fn failed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failed()).count()
    }

    /// Snippets of every successful query, in query order
    pub fn into_snippets(self) -> Vec<String> {
        self.outcomes
            .into_iter()
            .flat_map(|outcome| match outcome {
                QueryOutcome::Found { snippets, .. } => snippets,
                QueryOutcome::Failed { .. } => Vec::new(),
            })
            .collect()
    }
}

pub struct ResearchStage {
    llm: Arc<dyn LlmClient>,
    search: Arc<dyn SearchClient>,
    prompts: Arc<PromptLoader>,
    max_tokens: u32,
    max_queries: usize,
    results_per_query: usize,
}

impl ResearchStage {
    pub fn new(
        llm: Arc<dyn LlmClient>,
        search: Arc<dyn SearchClient>,
        prompts: Arc<PromptLoader>,
        max_tokens: u32,
        max_queries: usize,
        results_per_query: usize,
    ) -> Self {
        Self {
            llm,
            search,
            prompts,
            max_tokens,
            max_queries,
            results_per_query,
        }
    }

    pub async fn run(
        &self,
        destination: &str,
        dates: &str,
        preferences: &str,
        events: &EventEmitter,
    ) -> Result<ResearchOutput, PipelineError> {
        debug!(%destination, max_queries = self.max_queries, "ResearchStage::run: called");
        let queries = self.derive_queries(destination, dates, preferences, events).await?;
        events.queries_derived(&queries);

        let mut outcomes = Vec::with_capacity(queries.len());
        for query in &queries {
            let outcome = self.execute_query(query).await;
            match &outcome {
                QueryOutcome::Found { query, snippets } => events.search_completed(query, snippets.len()),
                QueryOutcome::Failed { query, error } => {
                    warn!(%query, %error, "ResearchStage::run: search failed");
                    events.search_failed(query, &error.to_string());
                }
            }
            outcomes.push(outcome);
        }

        Ok(ResearchOutput { queries, outcomes })
    }

    async fn derive_queries(
        &self,
        destination: &str,
        dates: &str,
        preferences: &str,
        events: &EventEmitter,
    ) -> Result<Vec<String>, PipelineError> {
        let system = self
            .prompts
            .research_prompt(self.max_queries)
            .map_err(|source| PipelineError::Prompt {
                stage: StageName::Research,
                source,
            })?;

        let request = CompletionRequest::new(system, trip_message(destination, dates, preferences), self.max_tokens);
        let response = self
            .llm
            .complete(request)
            .await
            .map_err(|source| PipelineError::GenerationFailure {
                stage: StageName::Research,
                source,
            })?;

        let queries = parse_queries(&response_text(response, StageName::Research, events), self.max_queries);
        debug!(count = queries.len(), "ResearchStage::derive_queries: parsed");
        Ok(queries)
    }

    async fn execute_query(&self, query: &str) -> QueryOutcome {
        match self.search.search(query, self.results_per_query).await {
            Ok(hits) => QueryOutcome::Found {
                query: query.to_string(),
                snippets: hits.into_iter().map(|hit| hit.content).collect(),
            },
            Err(error) => QueryOutcome::Failed {
                query: query.to_string(),
                error,
            },
        }
    }
}
