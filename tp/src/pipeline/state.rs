//! Travel state threaded through the pipeline
//!
//! One `TravelState` is created per request. The identity fields are fixed at
//! creation; each stage output is written once by the orchestrator, in order.

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use super::PipelineError;

/// The three stages of a pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageName {
    Plan,
    Research,
    Generate,
}

impl StageName {
    pub fn as_str(&self) -> &'static str {
        match self {
            StageName::Plan => "plan",
            StageName::Research => "research",
            StageName::Generate => "generate",
        }
    }
}

impl std::fmt::Display for StageName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position of a run in the pipeline state machine
///
/// `Created → Planned → Researched → Generated → Complete`. A run that fails
/// ends as the `PipelineError` returned by `TravelPlanner::process`, which
/// carries the failed stage and cause; no state outlives it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "lowercase")]
pub enum PipelinePhase {
    Created,
    Planned,
    Researched,
    Generated,
    Complete,
}

/// State for a single pipeline run
#[derive(Debug, Clone, Serialize)]
pub struct TravelState {
    run_id: Uuid,
    destination: String,
    dates: String,
    preferences: String,
    plan: String,
    research_snippets: Vec<String>,
    itinerary: String,
    phase: PipelinePhase,
}

impl TravelState {
    /// Create the state for a new run
    ///
    /// `destination` and `dates` must contain non-whitespace text. Values are kept verbatim.
    pub fn new(
        destination: impl Into<String>,
        dates: impl Into<String>,
        preferences: impl Into<String>,
    ) -> Result<Self, PipelineError> {
        let destination = destination.into();
        let dates = dates.into();

        if destination.trim().is_empty() {
            return Err(PipelineError::InvalidRequest("destination must not be empty".to_string()));
        }
        if dates.trim().is_empty() {
            return Err(PipelineError::InvalidRequest("dates must not be empty".to_string()));
        }

        let run_id = Uuid::now_v7();
        debug!(%run_id, %destination, %dates, "TravelState::new: created");

        Ok(Self {
            run_id,
            destination,
            dates,
            preferences: preferences.into(),
            plan: String::new(),
            research_snippets: Vec::new(),
            itinerary: String::new(),
            phase: PipelinePhase::Created,
        })
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn dates(&self) -> &str {
        &self.dates
    }

    pub fn preferences(&self) -> &str {
        &self.preferences
    }

    pub fn plan(&self) -> &str {
        &self.plan
    }

    pub fn research_snippets(&self) -> &[String] {
        &self.research_snippets
    }

    pub fn itinerary(&self) -> &str {
        &self.itinerary
    }

    pub fn phase(&self) -> &PipelinePhase {
        &self.phase
    }

    pub fn is_complete(&self) -> bool {
        self.phase == PipelinePhase::Complete
    }

    /// Created → Planned; an empty plan fails the run immediately
    pub(crate) fn merge_plan(&mut self, plan: String) -> Result<(), PipelineError> {
        debug_assert_eq!(self.phase, PipelinePhase::Created);
        if plan.trim().is_empty() {
            return Err(PipelineError::IncompleteResult {
                stage: StageName::Plan,
                field: "plan",
            });
        }
        self.plan = plan;
        self.phase = PipelinePhase::Planned;
        Ok(())
    }

    /// Planned → Researched; an empty snippet list is valid
    pub(crate) fn merge_research(&mut self, snippets: Vec<String>) {
        debug_assert_eq!(self.phase, PipelinePhase::Planned);
        self.research_snippets.extend(snippets);
        self.phase = PipelinePhase::Researched;
    }

    /// Researched → Generated; an empty itinerary fails the run immediately
    pub(crate) fn merge_itinerary(&mut self, itinerary: String) -> Result<(), PipelineError> {
        debug_assert_eq!(self.phase, PipelinePhase::Researched);
        if itinerary.trim().is_empty() {
            return Err(PipelineError::IncompleteResult {
                stage: StageName::Generate,
                field: "itinerary",
            });
        }
        self.itinerary = itinerary;
        self.phase = PipelinePhase::Generated;
        Ok(())
    }

    /// Generated → Complete, after checking that both texts are present
    pub(crate) fn complete(&mut self) -> Result<(), PipelineError> {
        if self.plan.trim().is_empty() {
            return Err(PipelineError::IncompleteResult {
                stage: StageName::Plan,
                field: "plan",
            });
        }
        if self.itinerary.trim().is_empty() {
            return Err(PipelineError::IncompleteResult {
                stage: StageName::Generate,
                field: "itinerary",
            });
        }
        self.phase = PipelinePhase::Complete;
        Ok(())
    }

    /// Map the final state to the response shape
    ///
    /// Empty snippets are dropped from `events`.
    pub fn into_response(self) -> TravelResponse {
        TravelResponse {
            itinerary: self.itinerary,
            plan: self.plan,
            events: self.research_snippets.into_iter().filter(|s| !s.is_empty()).collect(),
        }
    }
}

/// Inbound travel-planning request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelRequest {
    pub destination: String,
    pub dates: String,
    #[serde(default)]
    pub preferences: Option<String>,
}

impl TravelRequest {
    pub fn new(destination: impl Into<String>, dates: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            dates: dates.into(),
            preferences: None,
        }
    }

    pub fn with_preferences(mut self, preferences: impl Into<String>) -> Self {
        self.preferences = Some(preferences.into());
        self
    }

    /// Preferences, with an absent value read as empty
    pub fn preferences(&self) -> &str {
        self.preferences.as_deref().unwrap_or("")
    }
}

/// Successful pipeline result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelResponse {
    pub itinerary: String,
    pub plan: String,
    pub events: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_empty() {
        let state = TravelState::new("Lisbon", "June 10-14", "").unwrap();

        assert_eq!(state.destination(), "Lisbon");
        assert_eq!(state.dates(), "June 10-14");
        assert_eq!(state.preferences(), "");
        assert!(state.plan().is_empty());
        assert!(state.research_snippets().is_empty());
        assert!(state.itinerary().is_empty());
        assert_eq!(state.phase(), &PipelinePhase::Created);
    }

    #[test]
    fn test_new_rejects_blank_fields() {
        let err = TravelState::new("  ", "June", "").unwrap_err();
        assert!(err.cause().contains("destination"));

        let err = TravelState::new("Lisbon", "", "").unwrap_err();
        assert!(err.cause().contains("dates"));
    }

    #[test]
    fn test_run_ids_are_unique() {
        let a = TravelState::new("Lisbon", "June", "").unwrap();
        let b = TravelState::new("Lisbon", "June", "").unwrap();
        assert_ne!(a.run_id(), b.run_id());
    }

    #[test]
    fn test_phase_progression() {
        let mut state = TravelState::new("Lisbon", "June", "food").unwrap();

        state.merge_plan("Outline".to_string()).unwrap();
        assert_eq!(state.phase(), &PipelinePhase::Planned);

        state.merge_research(vec!["Sardine festival".to_string()]);
        assert_eq!(state.phase(), &PipelinePhase::Researched);

        state.merge_itinerary("Day 1".to_string()).unwrap();
        assert_eq!(state.phase(), &PipelinePhase::Generated);

        state.complete().unwrap();
        assert!(state.is_complete());
    }

    #[test]
    fn test_empty_outputs_are_incomplete() {
        let mut state = TravelState::new("Lisbon", "June", "").unwrap();
        let err = state.merge_plan("  \n".to_string()).unwrap_err();
        assert!(matches!(err, PipelineError::IncompleteResult { stage: StageName::Plan, .. }));

        state.merge_plan("Outline".to_string()).unwrap();
        state.merge_research(vec![]);
        let err = state.merge_itinerary(String::new()).unwrap_err();
        assert!(matches!(err, PipelineError::IncompleteResult { stage: StageName::Generate, .. }));
    }

    #[test]
    fn test_into_response_drops_empty_snippets() {
        let mut state = TravelState::new("Lisbon", "June", "").unwrap();
        state.merge_plan("Outline".to_string()).unwrap();
        state.merge_research(vec!["Fado".to_string(), String::new(), "Sardines".to_string()]);
        state.merge_itinerary("Day 1".to_string()).unwrap();
        state.complete().unwrap();

        let response = state.into_response();
        assert_eq!(response.plan, "Outline");
        assert_eq!(response.itinerary, "Day 1");
        assert_eq!(response.events, vec!["Fado", "Sardines"]);
    }

    #[test]
    fn test_travel_request_preferences_default() {
        let request: TravelRequest = serde_json::from_str(r#"{"destination":"Oslo","dates":"May"}"#).unwrap();
        assert_eq!(request.preferences(), "");

        let request: TravelRequest =
            serde_json::from_str(r#"{"destination":"Oslo","dates":"May","preferences":null}"#).unwrap();
        assert_eq!(request.preferences(), "");

        let request = TravelRequest::new("Oslo", "May").with_preferences("museums");
        assert_eq!(request.preferences(), "museums");
    }

    #[test]
    fn test_stage_name_display() {
        assert_eq!(StageName::Plan.to_string(), "plan");
        assert_eq!(StageName::Research.to_string(), "research");
        assert_eq!(StageName::Generate.to_string(), "generate");
        assert_eq!(serde_json::to_value(StageName::Generate).unwrap(), "generate");
    }
}
