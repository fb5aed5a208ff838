//! Coordinator states.

use std::fmt;

/// Why an attempt failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    NoIdentifier,
    FetchError,
    AlreadyResolved,
    VersionResolutionError,
    SubmissionError,
}

/// A state of the move workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationState {
    /// Ready for the next attempt.
    Idle,
    Fetching,
    Validating,
    /// The bug lacks required fields; the user has to fill them in.
    MissingFields,
    Transforming,
    Submitting,
    Resolving,
    Failed(FailureKind),
}

impl fmt::Display for MigrationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::Fetching => f.write_str("fetching"),
            Self::Validating => f.write_str("validating"),
            Self::MissingFields => f.write_str("missing fields"),
            Self::Transforming => f.write_str("transforming"),
            Self::Submitting => f.write_str("submitting"),
            Self::Resolving => f.write_str("resolving"),
            Self::Failed(kind) => write!(f, "failed ({kind:?})"),
        }
    }
}

