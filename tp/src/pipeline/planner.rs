//! Pipeline orchestrator
//!
//! `TravelPlanner` owns the stages and drives one `TravelState` through
//! `Created → Planned → Researched → Generated → Complete`. It holds no
//! per-request state, so one instance is shared by every concurrent request.

use std::sync::Arc;
use std::time::Instant;

use eyre::{Context, Result};
use tracing::{debug, info};

use super::stages::{GenerationStage, PlanStage, ResearchStage};
use super::{
    EventEmitter, PipelineError, PipelineObserver, StageName, TracingObserver, TravelRequest, TravelResponse,
    TravelState,
};
use crate::config::Config;
use crate::llm::{self, LlmClient};
use crate::prompts::PromptLoader;
use crate::search::{self, SearchClient};

/// Tunables shared by the stages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannerSettings {
    pub max_tokens: u32,
    pub max_queries: usize,
    pub results_per_query: usize,
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self {
            max_tokens: 4096,
            max_queries: 3,
            results_per_query: 2,
        }
    }
}

impl PlannerSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_tokens: config.llm.max_tokens,
            max_queries: config.research.max_queries,
            results_per_query: config.research.results_per_query,
        }
    }
}

pub struct TravelPlanner {
    plan: PlanStage,
    research: ResearchStage,
    generate: GenerationStage,
    observer: Arc<dyn PipelineObserver>,
}

impl TravelPlanner {
    pub fn new(
        llm: Arc<dyn LlmClient>,
        search: Arc<dyn SearchClient>,
        prompts: Arc<PromptLoader>,
        settings: PlannerSettings,
    ) -> Self {
        debug!(?settings, "TravelPlanner::new: called");
        Self {
            plan: PlanStage::new(llm.clone(), prompts.clone(), settings.max_tokens),
            research: ResearchStage::new(
                llm.clone(),
                search,
                prompts.clone(),
                settings.max_tokens,
                settings.max_queries,
                settings.results_per_query,
            ),
            generate: GenerationStage::new(llm, prompts, settings.max_tokens),
            observer: Arc::new(TracingObserver),
        }
    }

    /// Replace the default tracing observer
    pub fn with_observer(mut self, observer: Arc<dyn PipelineObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Build a planner with the clients and prompts named in config
    pub fn from_config(config: &Config) -> Result<Self> {
        let llm = llm::create_client(&config.llm).context("Failed to create LLM client")?;
        let search = search::create_client(&config.search).context("Failed to create search client")?;
        let prompts = PromptLoader::new(config.prompts.dir.as_deref()).context("Failed to load prompt templates")?;

        info!(
            llm_provider = %config.llm.provider,
            model = %config.llm.model,
            search_provider = %config.search.provider,
            "Travel planner ready"
        );
        Ok(Self::new(llm, search, Arc::new(prompts), PlannerSettings::from_config(config)))
    }

    /// Run the full pipeline for one trip
    ///
    /// Returns the state only once it is `Complete`. Any stage failure ends the
    /// run as the returned error, tagged with the stage and cause; later stages
    /// are not invoked.
    pub async fn process(&self, destination: &str, dates: &str, preferences: &str) -> Result<TravelState, PipelineError> {
        let mut state = TravelState::new(destination, dates, preferences)?;
        let events = EventEmitter::new(self.observer.clone(), state.run_id().to_string());
        let started = Instant::now();
        events.run_started(state.destination(), state.dates());

        match self.run_stages(&mut state, &events).await {
            Ok(()) => {
                events.run_completed(elapsed_ms(started));
                Ok(state)
            }
            Err(err) => {
                events.run_failed(err.stage(), &err.cause());
                Err(err)
            }
        }
    }

    /// Run the pipeline for a request and map the result to the response shape
    pub async fn process_request(&self, request: &TravelRequest) -> Result<TravelResponse, PipelineError> {
        let state = self
            .process(&request.destination, &request.dates, request.preferences())
            .await?;
        Ok(state.into_response())
    }

    async fn run_stages(&self, state: &mut TravelState, events: &EventEmitter) -> Result<(), PipelineError> {
        // Created → Planned
        let started = stage_started(events, StageName::Plan);
        let plan = self
            .plan
            .run(state.destination(), state.dates(), state.preferences(), events)
            .await?;
        state.merge_plan(plan)?;
        events.stage_completed(StageName::Plan, elapsed_ms(started));

        // Planned → Researched
        let started = stage_started(events, StageName::Research);
        let output = self
            .research
            .run(state.destination(), state.dates(), state.preferences(), events)
            .await?;
        debug!(
            queries = output.queries.len(),
            failed = output.failed_count(),
            "TravelPlanner::run_stages: research done"
        );
        state.merge_research(output.into_snippets());
        events.stage_completed(StageName::Research, elapsed_ms(started));

        // Researched → Generated
        let started = stage_started(events, StageName::Generate);
        let itinerary = self
            .generate
            .run(
                state.destination(),
                state.dates(),
                state.plan(),
                state.research_snippets(),
                state.preferences(),
                events,
            )
            .await?;
        state.merge_itinerary(itinerary)?;
        events.stage_completed(StageName::Generate, elapsed_ms(started));

        // Generated → Complete
        state.complete()
    }
}

fn stage_started(events: &EventEmitter, stage: StageName) -> Instant {
    events.stage_started(stage);
    Instant::now()
}

fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis() as u64
}
