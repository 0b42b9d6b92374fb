//! Plan stage: high-level itinerary outline

use std::sync::Arc;

use tracing::debug;

use super::{response_text, trip_message};
use crate::llm::{CompletionRequest, LlmClient};
use crate::pipeline::{EventEmitter, PipelineError, StageName};
use crate::prompts::PromptLoader;

pub struct PlanStage {
    llm: Arc<dyn LlmClient>,
    prompts: Arc<PromptLoader>,
    max_tokens: u32,
}

impl PlanStage {
    pub fn new(llm: Arc<dyn LlmClient>, prompts: Arc<PromptLoader>, max_tokens: u32) -> Self {
        Self {
            llm,
            prompts,
            max_tokens,
        }
    }

    /// Produce the plan outline
    ///
    /// The generated text is returned unmodified; emptiness is judged by the caller.
    pub async fn run(
        &self,
        destination: &str,
        dates: &str,
        preferences: &str,
        events: &EventEmitter,
    ) -> Result<String, PipelineError> {
        debug!(%destination, %dates, "PlanStage::run: called");
        let system = self.prompts.plan_prompt().map_err(|source| PipelineError::Prompt {
            stage: StageName::Plan,
            source,
        })?;

        let request = CompletionRequest::new(system, trip_message(destination, dates, preferences), self.max_tokens);
        let response = self
            .llm
            .complete(request)
            .await
            .map_err(|source| PipelineError::GenerationFailure {
                stage: StageName::Plan,
                source,
            })?;

        let plan = response_text(response, StageName::Plan, events);
        debug!(len = plan.len(), "PlanStage::run: plan generated");
        Ok(plan)
    }
}
