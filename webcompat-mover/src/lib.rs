#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod config;
pub mod coordinator;
pub mod intake;
pub mod record;
pub mod resolution;
pub mod steps;
pub mod summary;
pub mod templates;
pub mod tracker;
pub mod validation;
pub mod version;

pub use config::{ConfigError, MoverConfig, API_KEY_ENV};
pub use coordinator::{
    CoordinatorOptions, FailureKind, MigrationCoordinator, MigrationError, MigrationState,
    MISSING_FIELDS_HEADING,
};
pub use intake::{IntakeEndpoint, SubmissionError, TargetSubmission, WebcompatClient};
pub use record::{
    Comment, MissingFieldReport, RecordStatus, RequiredField, RequiredFieldSpec, SourceRecord,
};
pub use resolution::ResolutionDriver;
pub use steps::extract_steps;
pub use summary::{AttemptSummary, MigrationOutcome};
pub use templates::{BugContext, TemplateError, TemplateRenderer};
pub use tracker::{
    BugzillaClient, FetchError, HostTrackerAdapter, Notification, Resolution, RestHost,
    SourceTracker, TrackerError,
};
pub use validation::find_missing_required;
pub use version::{
    resolve_os, Platform, ProductDetailsClient, ReleaseChannel, ReleaseMetadata, VersionError,
    VersionResolver,
};
