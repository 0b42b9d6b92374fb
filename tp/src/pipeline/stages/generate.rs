//! Generation stage: final day-by-day itinerary

use std::sync::Arc;

use tracing::debug;

use super::response_text;

use crate::llm::{CompletionRequest, LlmClient};
use crate::pipeline::{EventEmitter, PipelineError, StageName};
use crate::prompts::{ItineraryContext, PromptLoader};

/// Join research snippets into the block embedded in the itinerary prompt
pub fn join_research(snippets: &[String]) -> String {
    snippets.join("\n\n")
}

pub struct GenerationStage {
    llm: Arc<dyn LlmClient>,
    prompts: Arc<PromptLoader>,
    max_tokens: u32,
}

impl GenerationStage {
    pub fn new(llm: Arc<dyn LlmClient>, prompts: Arc<PromptLoader>, max_tokens: u32) -> Self {
        Self {
            llm,
            prompts,
            max_tokens,
        }
    }

    pub async fn run(
        &self,
        destination: &str,
        dates: &str,
        plan: &str,
        snippets: &[String],
        preferences: &str,
        events: &EventEmitter,
    ) -> Result<String, PipelineError> {
        debug!(%destination, snippet_count = snippets.len(), "GenerationStage::run: called");
        let research = join_research(snippets);
        let system = self
            .prompts
            .itinerary_prompt(&ItineraryContext {
                plan,
                research: &research,
                preferences,
            })
            .map_err(|source| PipelineError::Prompt {
                stage: StageName::Generate,
                source,
            })?;

        let user = format!("Destination: {}\n\nDates: {}", destination, dates);
        let response = self
            .llm
            .complete(CompletionRequest::new(system, user, self.max_tokens))
            .await
            .map_err(|source| PipelineError::GenerationFailure {
                stage: StageName::Generate,
                source,
            })?;

        Ok(response_text(response, StageName::Generate, events))
    }
}
