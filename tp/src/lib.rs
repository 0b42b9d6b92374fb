//! TravelPlanner - trip itinerary generator
//!
//! Turns a destination, free-text dates and optional preferences into a
//! day-by-day itinerary by running three stages in order:
//!
//! 1. **plan** - an LLM writes a high-level outline
//! 2. **research** - the LLM proposes search queries; a web search API
//!    returns event snippets for each
//! 3. **generate** - the LLM synthesizes the final itinerary from the outline
//!    and the snippets
//!
//! # Modules
//!
//! - [`pipeline`] - Travel state, stages and the orchestrator
//! - [`llm`] - Text-generation trait and provider clients
//! - [`search`] - Web-search trait and provider clients
//! - [`prompts`] - Handlebars prompt templates
//! - [`server`] - axum HTTP front end
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface

pub mod cli;
pub mod config;
pub mod llm;
pub mod pipeline;
pub mod prompts;
pub mod search;
pub mod server;

pub use config::Config;
pub use pipeline::{PipelineError, TravelPlanner, TravelRequest, TravelResponse, TravelState};
