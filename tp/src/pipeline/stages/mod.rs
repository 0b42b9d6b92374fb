//! The three pipeline stages
//!
//! Each stage wraps exactly one unit of work and knows nothing about the state
//! machine; the `TravelPlanner` decides order and merges outputs.

mod generate;
mod plan;
mod research;

pub use generate::{GenerationStage, join_research};
pub use plan::PlanStage;
pub use research::{QueryOutcome, ResearchOutput, ResearchStage, parse_queries};

use tracing::warn;

use crate::llm::CompletionResponse;
use crate::pipeline::{EventEmitter, StageName};

/// User message shared by the plan and research stages
pub(crate) fn trip_message(destination: &str, dates: &str, preferences: &str) -> String {
    format!(
        "Destination: {}\n\nDates: {}\n\nPreferences: {}",
        destination, dates, preferences
    )
}

/// Take the generated text, reporting output cut off at the token limit
pub(crate) fn response_text(response: CompletionResponse, stage: StageName, events: &EventEmitter) -> String {
    if response.is_truncated() {
        warn!(%stage, "response_text: output hit the token limit");
        events.output_truncated(stage);
    }
    response.into_text()
}
