//! Intake submission error types.

use thiserror::Error;

/// Errors that can occur while submitting a report.
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// The request failed or the response body was unreadable.
    #[error("Submission request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The intake endpoint answered with an error status.
    #[error("Intake endpoint returned HTTP {status}")]
    Status { status: u16 },

    /// The response did not say where the new report lives.
    #[error("Intake response did not include the new report URL")]
    MissingUrl,
}
