//! Provenance text rendering using Handlebars.
//!
//! The steps fallback message and report description are configurable
//! formats that can reference the bug being moved.

mod error;
mod renderer;

pub use error::TemplateError;
pub use renderer::{create_handlebars_registry, BugContext, TemplateRenderer};
