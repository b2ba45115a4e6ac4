//! Template cache and renderer.
//!
//! # Responsibilities
//! - Register the built-in name → source table into Tera at startup
//! - Render a named template against a JSON data context
//! - Degrade unknown names and render failures to diagnostic text
//!
//! # Design Decisions
//! - Immutable after construction; safe to share across requests
//! - Render is a pure function of (source, data); no persisted state
//!   besides the lookup table itself

use std::collections::HashSet;

use serde_json::Value;
use tera::Tera;

use crate::render::templates;

/// In-memory template table plus the Tera instance rendering it.
pub struct TemplateCache {
    tera: Tera,
    names: HashSet<String>,
}

impl TemplateCache {
    /// Build a cache from explicit name → source pairs.
    pub fn new(sources: &[(&str, &str)]) -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(sources.to_vec())?;
        let names = sources.iter().map(|(name, _)| (*name).to_string()).collect();
        Ok(Self { tera, names })
    }

    /// Build the cache holding the built-in dashboard templates.
    pub fn builtin() -> Result<Self, tera::Error> {
        Self::new(templates::BUILTIN)
    }

    /// Whether a template of this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Render `name` against `data`.
    ///
    /// An unknown name returns `Missing template: <name>`; a render failure
    /// returns inline diagnostic text. Neither aborts the response.
    pub fn render(&self, name: &str, data: &Value) -> String {
        if !self.contains(name) {
            return format!("Missing template: {}", name);
        }

        let context = match tera::Context::from_value(data.clone()) {
            Ok(context) => context,
            Err(e) => {
                tracing::error!(template = %name, error = %e, "template data was not an object");
                return format!("Template error: {}", name);
            }
        };

        match self.tera.render(name, &context) {
            Ok(html) => html,
            Err(e) => {
                tracing::error!(template = %name, error = %e, "template render failed");
                format!("Template error: {}", name)
            }
        }
    }
}
