//! Prompt Loader
//!
//! Loads prompt templates from an override directory or falls back to the
//! embedded defaults, and renders them with Handlebars.

use std::path::{Path, PathBuf};

use handlebars::Handlebars;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use super::embedded;

/// Errors loading or rendering prompt templates
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("Failed to read prompt {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid prompt template '{name}': {source}")]
    Template {
        name: String,
        #[source]
        source: Box<handlebars::TemplateError>,
    },

    #[error("Failed to render prompt '{name}': {source}")]
    Render {
        name: String,
        #[source]
        source: Box<handlebars::RenderError>,
    },
}

/// Variables for the itinerary template
#[derive(Debug, Clone, Serialize)]
pub struct ItineraryContext<'a> {
    pub plan: &'a str,
    /// Research snippets already joined into one block
    pub research: &'a str,
    pub preferences: &'a str,
}

#[derive(Serialize)]
struct ResearchContext {
    query_count: usize,
}

#[derive(Serialize)]
struct EmptyContext {}

/// Loads and renders prompt templates
///
/// Every template is compiled when the loader is built, so a broken override
/// fails at startup rather than on the first request.
pub struct PromptLoader {
    hbs: Handlebars<'static>,
}

impl PromptLoader {
    /// Create a loader, preferring `{dir}/{name}.pmt` over the embedded template
    pub fn new(override_dir: Option<&Path>) -> Result<Self, PromptError> {
        debug!(?override_dir, "PromptLoader::new: called");
        let mut hbs = Handlebars::new();
        hbs.register_escape_fn(handlebars::no_escape);
        hbs.set_strict_mode(true);

        for name in embedded::TEMPLATE_NAMES {
            let source = Self::load_template(override_dir, name)?;
            hbs.register_template_string(name, source)
                .map_err(|e| PromptError::Template {
                    name: name.to_string(),
                    source: Box::new(e),
                })?;
        }

        Ok(Self { hbs })
    }

    /// Create a loader that only uses embedded prompts
    pub fn embedded_only() -> Result<Self, PromptError> {
        Self::new(None)
    }

    /// Load a template source by name
    ///
    /// Checks in order:
    /// 1. Override: `{override_dir}/{name}.pmt`
    /// 2. Embedded fallback
    fn load_template(override_dir: Option<&Path>, name: &str) -> Result<String, PromptError> {
        if let Some(dir) = override_dir {
            let path = dir.join(format!("{}.pmt", name));
            if path.exists() {
                info!("Using prompt override {}", path.display());
                return std::fs::read_to_string(&path).map_err(|source| PromptError::Read { path, source });
            }
            debug!(?path, "PromptLoader::load_template: no override");
        }

        // TEMPLATE_NAMES and get_embedded are kept in step by the embedded tests
        Ok(embedded::get_embedded(name).unwrap_or_default().to_string())
    }

    /// Render a registered template with the given context
    pub fn render<T: Serialize>(&self, name: &str, context: &T) -> Result<String, PromptError> {
        debug!(%name, "PromptLoader::render: called");
        self.hbs.render(name, context).map_err(|e| PromptError::Render {
            name: name.to_string(),
            source: Box::new(e),
        })
    }

    /// System prompt for the plan stage
    pub fn plan_prompt(&self) -> Result<String, PromptError> {
        self.render("plan", &EmptyContext {})
    }

    /// System prompt for search query derivation
    pub fn research_prompt(&self, query_count: usize) -> Result<String, PromptError> {
        self.render("research", &ResearchContext { query_count })
    }

    /// System prompt for the itinerary synthesis
    pub fn itinerary_prompt(&self, context: &ItineraryContext<'_>) -> Result<String, PromptError> {
        self.render("itinerary", context)
    }
}
