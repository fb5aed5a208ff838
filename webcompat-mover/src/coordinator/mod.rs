//! The move workflow.
//!
//! One call to [`MigrationCoordinator::start`] is one press of the move
//! trigger. The attempt runs fetch → validate → transform → submit →
//! resolve, strictly in that order, and always ends with the trigger
//! enabled and a message on the host's notification area.

mod error;
mod options;
mod state;

pub use error::MigrationError;
pub use options::CoordinatorOptions;
pub use state::{FailureKind, MigrationState};

use crate::intake::{IntakeEndpoint, TargetSubmission};
use crate::record::SourceRecord;
use crate::resolution::ResolutionDriver;
use crate::steps::extract_steps;
use crate::summary::{AttemptSummary, MigrationOutcome};
use crate::templates::{BugContext, TemplateError, TemplateRenderer};
use crate::tracker::{HostTrackerAdapter, Notification, SourceTracker};
use crate::validation::find_missing_required;
use crate::version::{resolve_os, ReleaseMetadata, VersionError, VersionResolver};
use std::sync::Arc;
use tracing::{debug, error, info, info_span, warn, Instrument};

/// Heading shown above the list of missing fields.
pub const MISSING_FIELDS_HEADING: &str = "Please fill in the following:";

/// Runs move attempts for the bug the host is showing.
///
/// `start` takes `&mut self`, so a coordinator runs at most one attempt at a
/// time.
pub struct MigrationCoordinator {
    host: Arc<dyn HostTrackerAdapter>,
    tracker: Arc<dyn SourceTracker>,
    resolver: VersionResolver,
    intake: Arc<dyn IntakeEndpoint>,
    renderer: TemplateRenderer,
    options: CoordinatorOptions,
    state: MigrationState,
    states: Vec<MigrationState>,
}

impl MigrationCoordinator {
    /// Creates a coordinator from its collaborators.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] if a configured text format does not render.
    pub fn new(
        host: Arc<dyn HostTrackerAdapter>,
        tracker: Arc<dyn SourceTracker>,
        metadata: Arc<dyn ReleaseMetadata>,
        intake: Arc<dyn IntakeEndpoint>,
        options: CoordinatorOptions,
    ) -> Result<Self, TemplateError> {
        let renderer = TemplateRenderer::new();

        // Surface bad formats now rather than mid-attempt.
        let sample = BugContext {
            bug_id: "0".to_string(),
            bug_url: options.bug_url("0"),
        };
        renderer.render_fallback_message(options.fallback_message_format(), &sample)?;
        renderer.render_description(options.description_format(), &sample)?;

        Ok(Self {
            host,
            tracker,
            resolver: VersionResolver::new(metadata),
            intake,
            renderer,
            options,
            state: MigrationState::Idle,
            states: Vec::new(),
        })
    }

    /// Current state.
    pub fn state(&self) -> MigrationState {
        self.state
    }

    /// Runs one move attempt for the host's current bug.
    pub async fn start(&mut self) -> AttemptSummary {
        self.states.clear();
        self.state = MigrationState::Idle;

        let record_id = self
            .host
            .record_identifier()
            .filter(|id| !id.trim().is_empty());

        let outcome = match &record_id {
            None => {
                // The trigger was never disabled, so there is nothing to re-enable.
                let outcome = self.fail(MigrationError::NoIdentifier);
                self.present(&outcome);
                outcome
            }
            Some(id) => {
                let span = info_span!("move_bug", bug_id = %id);
                self.host.set_trigger_enabled(false);
                let outcome = self.run(id).instrument(span).await;
                self.present(&outcome);
                self.host.set_trigger_enabled(true);
                outcome
            }
        };

        AttemptSummary {
            record_id,
            states: std::mem::take(&mut self.states),
            outcome,
        }
    }

    async fn run(&mut self, id: &str) -> MigrationOutcome {
        self.enter(MigrationState::Fetching);
        let record = match self.tracker.fetch_record(id).await {
            Ok(record) => record,
            Err(e) => return self.fail(e.into()),
        };

        self.enter(MigrationState::Validating);
        if record.status.is_resolved() {
            return self.fail(MigrationError::AlreadyResolved {
                status: record.status.clone(),
            });
        }

        let missing = find_missing_required(&record, self.options.required_fields());
        if !missing.is_empty() {
            info!(missing = missing.len(), "Bug is missing required fields");
            self.enter(MigrationState::MissingFields);
            return MigrationOutcome::MissingFields(missing);
        }

        self.enter(MigrationState::Transforming);
        let submission = match self.build_submission(&record).await {
            Ok(submission) => submission,
            Err(e) => return self.fail(e.into()),
        };

        if self.options.dry_run() {
            info!(?submission, "Dry run, not submitting");
            self.enter(MigrationState::Idle);
            return MigrationOutcome::DryRun(submission);
        }

        self.enter(MigrationState::Submitting);
        let cross_reference = match self.intake.submit(&submission).await {
            Ok(url) => url,
            Err(e) => return self.fail(e.into()),
        };

        self.enter(MigrationState::Resolving);
        ResolutionDriver::resolve_as_moved(self.host.as_ref(), &record, &cross_reference).await;

        self.enter(MigrationState::Idle);
        MigrationOutcome::Moved { cross_reference }
    }

    /// Builds the report for `record`.
    async fn build_submission(&self, record: &SourceRecord) -> Result<TargetSubmission, VersionError> {
        let browser = self
            .resolver
            .resolve_browser(record.version.as_deref(), record.op_sys.as_deref())
            .await?;
        let os = resolve_os(record.op_sys.as_deref());

        let context = BugContext {
            bug_id: record.id.clone(),
            bug_url: self.options.bug_url(&record.id),
        };
        let fallback_format = self.options.fallback_message_format();
        let fallback = self
            .renderer
            .render_fallback_message(fallback_format, &context)
            .unwrap_or_else(|e| unrendered(fallback_format, &e));
        let description_format = self.options.description_format();
        let description = self
            .renderer
            .render_description(description_format, &context)
            .unwrap_or_else(|e| unrendered(description_format, &e));
        let steps = extract_steps(&record.comments, &fallback);

        debug!(%browser, %os, "Built report");
        Ok(TargetSubmission::new(
            record.url.clone().unwrap_or_default(),
            browser,
            os,
            description,
            steps,
        ))
    }

    fn enter(&mut self, state: MigrationState) {
        debug!(from = %self.state, to = %state, "State transition");
        self.state = state;
        self.states.push(state);
    }

    fn fail(&mut self, error: MigrationError) -> MigrationOutcome {
        error!(error = %error, "Move failed");
        self.enter(MigrationState::Failed(error.kind()));
        MigrationOutcome::Failed(error)
    }

    fn present(&self, outcome: &MigrationOutcome) {
        let notification = match outcome {
            MigrationOutcome::Moved { cross_reference } => {
                Notification::text(format!("Moved to {cross_reference}"))
            }
            MigrationOutcome::MissingFields(missing) => Notification::with_items(
                MISSING_FIELDS_HEADING,
                missing.descriptions().to_vec(),
            ),
            MigrationOutcome::DryRun(_) => {
                Notification::text("Dry run: the report was built but not submitted.")
            }
            MigrationOutcome::Failed(error) => Notification::text(error.to_string()),
        };
        self.host.show_notification(&notification);
    }
}

fn unrendered(format: &str, error: &TemplateError) -> String {
    warn!(error = %error, "Using unrendered text format");
    format.to_string()
}
