//! Move attempt error types.

use super::FailureKind;
use crate::intake::SubmissionError;
use crate::record::RecordStatus;
use crate::tracker::FetchError;
use crate::version::VersionError;
use thiserror::Error;

/// Reasons a move attempt stops before the bug is resolved.
///
/// The `Display` text is what the user sees in the notification area.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// The host is not showing a bug.
    #[error("A valid bug ID could not be found. Please check you're actually viewing a bug.")]
    NoIdentifier,

    /// The bug could not be read.
    #[error("Could not load the bug from Bugzilla: {0}")]
    Fetch(#[from] FetchError),

    /// The bug is already closed.
    #[error("This bug is already {status}. Only open bugs can be moved to webcompat.com.")]
    AlreadyResolved { status: RecordStatus },

    /// The nightly version lookup failed.
    #[error("Could not determine the Firefox version for this bug: {0}")]
    VersionResolution(#[from] VersionError),

    /// webcompat.com did not accept the report.
    #[error("Could not create the report on webcompat.com: {0}")]
    Submission(#[from] SubmissionError),
}

impl MigrationError {
    /// The failure category for state tracking.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::NoIdentifier => FailureKind::NoIdentifier,
            Self::Fetch(_) => FailureKind::FetchError,
            Self::AlreadyResolved { .. } => FailureKind::AlreadyResolved,
            Self::VersionResolution(_) => FailureKind::VersionResolutionError,
            Self::Submission(_) => FailureKind::SubmissionError,
        }
    }
}
