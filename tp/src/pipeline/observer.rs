//! Pipeline events and observers
//!
//! Events describe the progress of one run. The orchestrator hands them to a
//! `PipelineObserver` through an `EventEmitter` bound to the run id.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::StageName;

/// Observable activity of a pipeline run
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PipelineEvent {
    // === Run Lifecycle ===
    /// A run has started
    RunStarted { run_id: String, destination: String, dates: String },
    /// A run produced a complete result
    RunCompleted { run_id: String, duration_ms: u64 },
    /// A run failed and no result will be returned
    RunFailed { run_id: String, stage: String, cause: String },

    // === Stages ===
    /// A stage has started
    StageStarted { run_id: String, stage: StageName },
    /// A stage finished and its output was merged into the state
    StageCompleted {
        run_id: String,
        stage: StageName,
        duration_ms: u64,
    },

    /// Model output hit the token limit and may be cut off
    OutputTruncated { run_id: String, stage: StageName },

    // === Research ===
    /// Search queries were derived from the model output
    QueriesDerived { run_id: String, queries: Vec<String> },
    /// A search query returned results
    SearchCompleted {
        run_id: String,
        query: String,
        snippet_count: usize,
    },
    /// A search query failed and was skipped
    SearchFailed { run_id: String, query: String, error: String },
}

impl PipelineEvent {
    /// Get the run ID for this event
    pub fn run_id(&self) -> &str {
        match self {
            PipelineEvent::RunStarted { run_id, .. }
            | PipelineEvent::RunCompleted { run_id, .. }
            | PipelineEvent::RunFailed { run_id, .. }
            | PipelineEvent::StageStarted { run_id, .. }
            | PipelineEvent::StageCompleted { run_id, .. }
            | PipelineEvent::OutputTruncated { run_id, .. }
            | PipelineEvent::QueriesDerived { run_id, .. }
            | PipelineEvent::SearchCompleted { run_id, .. }
            | PipelineEvent::SearchFailed { run_id, .. } => run_id,
        }
    }

    /// Get the event type name (for logging/filtering)
    pub fn event_type(&self) -> &'static str {
        match self {
            PipelineEvent::RunStarted { .. } => "RunStarted",
            PipelineEvent::RunCompleted { .. } => "RunCompleted",
            PipelineEvent::RunFailed { .. } => "RunFailed",
            PipelineEvent::StageStarted { .. } => "StageStarted",
            PipelineEvent::StageCompleted { .. } => "StageCompleted",
            PipelineEvent::OutputTruncated { .. } => "OutputTruncated",
            PipelineEvent::QueriesDerived { .. } => "QueriesDerived",
            PipelineEvent::SearchCompleted { .. } => "SearchCompleted",
            PipelineEvent::SearchFailed { .. } => "SearchFailed",
        }
    }
}

/// Receives pipeline events
///
/// Called inline from the run; implementations must not block.
pub trait PipelineObserver: Send + Sync {
    fn on_event(&self, event: &PipelineEvent);
}

/// Writes events to the tracing log
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl PipelineObserver for TracingObserver {
    fn on_event(&self, event: &PipelineEvent) {
        match event {
            PipelineEvent::RunStarted {
                run_id,
                destination,
                dates,
            } => info!(%run_id, %destination, %dates, "Run started"),
            PipelineEvent::RunCompleted { run_id, duration_ms } => {
                info!(%run_id, duration_ms, "Run completed")
            }
            PipelineEvent::RunFailed { run_id, stage, cause } => {
                warn!(%run_id, %stage, %cause, "Run failed")
            }
            PipelineEvent::StageStarted { run_id, stage } => info!(%run_id, %stage, "Stage started"),
            PipelineEvent::StageCompleted {
                run_id,
                stage,
                duration_ms,
            } => info!(%run_id, %stage, duration_ms, "Stage completed"),
            PipelineEvent::OutputTruncated { run_id, stage } => {
                warn!(%run_id, %stage, "Model output hit the token limit")
            }
            PipelineEvent::QueriesDerived { run_id, queries } => {
                info!(%run_id, count = queries.len(), ?queries, "Search queries derived")
            }
            PipelineEvent::SearchCompleted {
                run_id,
                query,
                snippet_count,
            } => debug!(%run_id, %query, snippet_count, "Search completed"),
            PipelineEvent::SearchFailed { run_id, query, error } => {
                warn!(%run_id, %query, %error, "Search failed, skipping query")
            }
        }
    }
}

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {
    fn on_event(&self, _event: &PipelineEvent) {}
}

/// Keeps every event in memory, in emission order
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<PipelineEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events seen so far
    pub fn events(&self) -> Vec<PipelineEvent> {
        self.events.lock().map(|events| events.clone()).unwrap_or_default()
    }

    /// Event type names in emission order
    pub fn event_types(&self) -> Vec<&'static str> {
        self.events().iter().map(PipelineEvent::event_type).collect()
    }
}

impl PipelineObserver for RecordingObserver {
    fn on_event(&self, event: &PipelineEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}

/// Emits events for a specific run
///
/// Bound to a run id so stages don't pass it around.
#[derive(Clone)]
pub struct EventEmitter {
    observer: Arc<dyn PipelineObserver>,
    run_id: String,
}

impl EventEmitter {
    pub fn new(observer: Arc<dyn PipelineObserver>, run_id: impl Into<String>) -> Self {
        Self {
            observer,
            run_id: run_id.into(),
        }
    }

    /// Get the run ID this emitter is bound to
    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Emit a raw event
    pub fn emit(&self, event: PipelineEvent) {
        debug!(event_type = event.event_type(), "EventEmitter::emit");
        self.observer.on_event(&event);
    }

    // === Convenience methods ===

    pub fn run_started(&self, destination: &str, dates: &str) {
        self.emit(PipelineEvent::RunStarted {
            run_id: self.run_id.clone(),
            destination: destination.to_string(),
            dates: dates.to_string(),
        });
    }

    pub fn run_completed(&self, duration_ms: u64) {
        self.emit(PipelineEvent::RunCompleted {
            run_id: self.run_id.clone(),
            duration_ms,
        });
    }

    pub fn run_failed(&self, stage: &str, cause: &str) {
        self.emit(PipelineEvent::RunFailed {
            run_id: self.run_id.clone(),
            stage: stage.to_string(),
            cause: cause.to_string(),
        });
    }

    pub fn stage_started(&self, stage: StageName) {
        self.emit(PipelineEvent::StageStarted {
            run_id: self.run_id.clone(),
            stage,
        });
    }

    pub fn stage_completed(&self, stage: StageName, duration_ms: u64) {
        self.emit(PipelineEvent::StageCompleted {
            run_id: self.run_id.clone(),
            stage,
            duration_ms,
        });
    }

    pub fn output_truncated(&self, stage: StageName) {
        self.emit(PipelineEvent::OutputTruncated {
            run_id: self.run_id.clone(),
            stage,
        });
    }

    pub fn queries_derived(&self, queries: &[String]) {
        self.emit(PipelineEvent::QueriesDerived {
            run_id: self.run_id.clone(),
            queries: queries.to_vec(),
        });
    }

    pub fn search_completed(&self, query: &str, snippet_count: usize) {
        self.emit(PipelineEvent::SearchCompleted {
            run_id: self.run_id.clone(),
            query: query.to_string(),
            snippet_count,
        });
    }

    pub fn search_failed(&self, query: &str, error: &str) {
        self.emit(PipelineEvent::SearchFailed {
            run_id: self.run_id.clone(),
            query: query.to_string(),
            error: error.to_string(),
        });
    }
}
