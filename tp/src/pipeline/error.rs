//! Pipeline error types

use thiserror::Error;

use super::StageName;
use crate::llm::LlmError;
use crate::prompts::PromptError;

/// Failure of a pipeline run
///
/// Per-query search failures never appear here; the research stage absorbs them.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A required request field was missing or blank; no stage ran
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A Text-Generation call failed
    #[error("{stage} stage failed: {source}")]
    GenerationFailure {
        stage: StageName,
        #[source]
        source: LlmError,
    },

    /// A stage succeeded but produced empty text
    #[error("{stage} stage returned an empty {field}")]
    IncompleteResult { stage: StageName, field: &'static str },

    /// A stage could not render its system prompt
    #[error("{stage} stage could not render its prompt: {source}")]
    Prompt {
        stage: StageName,
        #[source]
        source: PromptError,
    },
}

impl PipelineError {
    /// Name of the stage the failure originated in ("request" for validation failures)
    pub fn stage(&self) -> &'static str {
        match self {
            PipelineError::InvalidRequest(_) => "request",
            PipelineError::GenerationFailure { stage, .. }
            | PipelineError::IncompleteResult { stage, .. }
            | PipelineError::Prompt { stage, .. } => stage.as_str(),
        }
    }

    /// Underlying cause message, without the stage prefix
    pub fn cause(&self) -> String {
        match self {
            PipelineError::InvalidRequest(msg) => msg.clone(),
            PipelineError::GenerationFailure { source, .. } => source.to_string(),
            PipelineError::IncompleteResult { field, .. } => format!("model returned an empty {}", field),
            PipelineError::Prompt { source, .. } => source.to_string(),
        }
    }

    /// Stable machine-readable code for transport layers
    pub fn code(&self) -> &'static str {
        match self {
            PipelineError::InvalidRequest(_) => "VALIDATION_ERROR",
            PipelineError::GenerationFailure { .. } => "GENERATION_FAILURE",
            PipelineError::IncompleteResult { .. } => "INCOMPLETE_RESULT",
            PipelineError::Prompt { .. } => "PROMPT_ERROR",
        }
    }

    pub fn is_incomplete_result(&self) -> bool {
        matches!(self, PipelineError::IncompleteResult { .. })
    }
}
