//! Template renderer.

use super::TemplateError;
use handlebars::{no_escape, Handlebars};
use serde::Serialize;

/// Creates a configured Handlebars registry.
///
/// The registry is configured with:
/// - No HTML escaping (reports are plain text)
/// - Strict mode (catches misspelled variables)
#[must_use]
pub fn create_handlebars_registry() -> Handlebars<'static> {
    let mut hbs = Handlebars::new();
    hbs.register_escape_fn(no_escape);
    hbs.set_strict_mode(true);
    hbs
}

/// Variables available to provenance templates.
#[derive(Debug, Clone, Serialize)]
pub struct BugContext {
    /// Bug identifier.
    pub bug_id: String,
    /// Human-facing URL of the bug.
    pub bug_url: String,
}

/// Renders provenance text for reports.
pub struct TemplateRenderer {
    handlebars: Handlebars<'static>,
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer {
    /// Creates a new template renderer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlebars: create_handlebars_registry(),
        }
    }

    /// Renders the steps text used when a bug has no description.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] if the format is invalid or references an
    /// unknown variable.
    pub fn render_fallback_message(
        &self,
        format: &str,
        context: &BugContext,
    ) -> Result<String, TemplateError> {
        Ok(self.handlebars.render_template(format, context)?)
    }

    /// Renders the report description.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] if the format is invalid or references an
    /// unknown variable.
    pub fn render_description(
        &self,
        format: &str,
        context: &BugContext,
    ) -> Result<String, TemplateError> {
        Ok(self.handlebars.render_template(format, context)?)
    }
}
