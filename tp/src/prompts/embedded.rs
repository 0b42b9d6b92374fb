//! Embedded prompts
//!
//! These are compiled into the binary from .pmt files at build time.

use tracing::debug;

/// High-level itinerary outline prompt
pub const PLAN: &str = include_str!("../../prompts/plan.pmt");

/// Search query derivation prompt
pub const RESEARCH: &str = include_str!("../../prompts/research.pmt");

/// Final itinerary synthesis prompt
pub const ITINERARY: &str = include_str!("../../prompts/itinerary.pmt");

/// Names of every template the pipeline renders
pub const TEMPLATE_NAMES: [&str; 3] = ["plan", "research", "itinerary"];

/// Get the embedded prompt by name
pub fn get_embedded(name: &str) -> Option<&'static str> {
    debug!(%name, "get_embedded: called");
    match name {
        "plan" => Some(PLAN),
        "research" => Some(RESEARCH),
        "itinerary" => Some(ITINERARY),
        _ => None,
    }
}
