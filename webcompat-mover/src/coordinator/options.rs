//! Coordinator options.

use crate::config::MoverConfig;
use crate::record::RequiredFieldSpec;
use url::Url;

/// Settings for a [`MigrationCoordinator`](super::MigrationCoordinator).
#[derive(Debug, Clone)]
pub struct CoordinatorOptions {
    /// Origin used to build the bug's public URL.
    tracker_origin: Url,
    /// Handlebars format of the steps fallback text.
    fallback_message_format: String,
    /// Handlebars format of the report description.
    description_format: String,
    /// Fields that must be set before a move.
    required: RequiredFieldSpec,
    /// Whether to stop after building the report.
    dry_run: bool,
}

impl CoordinatorOptions {
    /// Takes tracker origin and text formats from `config`.
    pub fn from_config(config: &MoverConfig) -> Self {
        Self {
            tracker_origin: config.tracker_origin().clone(),
            fallback_message_format: config.fallback_message_format().to_string(),
            description_format: config.description_format().to_string(),
            required: RequiredFieldSpec::default(),
            dry_run: false,
        }
    }

    /// Sets dry-run mode.
    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn tracker_origin(&self) -> &Url {
        &self.tracker_origin
    }

    pub fn fallback_message_format(&self) -> &str {
        &self.fallback_message_format
    }

    pub fn description_format(&self) -> &str {
        &self.description_format
    }

    pub fn required_fields(&self) -> &RequiredFieldSpec {
        &self.required
    }

    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    /// Public URL of bug `id`, e.g. `https://bugzilla.mozilla.org/show_bug.cgi?id=1`.
    pub fn bug_url(&self, id: &str) -> String {
        match self.tracker_origin.join("show_bug.cgi") {
            Ok(mut url) => {
                url.query_pairs_mut().append_pair("id", id);
                url.to_string()
            }
            Err(_) => format!("{}show_bug.cgi?id={id}", self.tracker_origin),
        }
    }
}
