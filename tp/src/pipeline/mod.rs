//! Travel planning pipeline
//!
//! Runs three stages in a fixed order over one `TravelState`:
//!
//! 1. **plan**: outline the trip from destination, dates and preferences
//! 2. **research**: derive search queries and collect event snippets
//! 3. **generate**: synthesize the day-by-day itinerary
//!
//! A stage failure ends the run and is reported tagged with the stage name.
//! Individual search failures inside research are absorbed.

mod error;
mod observer;
mod planner;
pub mod stages;
mod state;

pub use error::PipelineError;
pub use observer::{EventEmitter, NoopObserver, PipelineEvent, PipelineObserver, RecordingObserver, TracingObserver};
pub use planner::{PlannerSettings, TravelPlanner};
pub use state::{PipelinePhase, StageName, TravelRequest, TravelResponse, TravelState};
