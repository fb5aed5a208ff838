//! Move attempt outcomes.

use crate::coordinator::{FailureKind, MigrationError};
use crate::intake::TargetSubmission;
use crate::record::MissingFieldReport;

/// How a move attempt ended.
#[derive(Debug)]
pub enum MigrationOutcome {
    /// The report was created and the bug resolved.
    Moved {
        /// URL of the new report.
        cross_reference: String,
    },

    /// The bug needs more information before it can be moved.
    MissingFields(MissingFieldReport),

    /// The report was built but, as requested, not submitted.
    DryRun(TargetSubmission),

    /// The attempt failed.
    Failed(MigrationError),
}

impl MigrationOutcome {
    /// Failure category, if the attempt failed.
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Self::Failed(error) => Some(error.kind()),
            _ => None,
        }
    }
}
