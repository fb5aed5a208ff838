//! Source tracker error types.

use thiserror::Error;

/// Errors that can occur while reading a bug.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request failed or the response body was unreadable.
    #[error("Bug request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The response body is not a bug list.
    #[error("Unreadable bug response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The tracker answered with an error status.
    #[error("Tracker returned HTTP {status} for bug {id}")]
    Status { id: String, status: u16 },

    /// The tracker returned no bug for the identifier.
    #[error("Bug {id} was not found or is not visible")]
    NotFound { id: String },

    /// The tracker origin cannot address REST resources.
    #[error("Tracker origin '{origin}' cannot be used as a base URL")]
    InvalidOrigin { origin: String },
}

/// Errors raised by host tracker operations while resolving a bug.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// The request failed.
    #[error("Tracker request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The tracker rejected the update.
    #[error("Tracker returned HTTP {status} updating bug {id}")]
    Status { id: String, status: u16 },

    /// Updating bugs needs an API key.
    #[error("No tracker API key configured; set api-key or BUGZILLA_API_KEY")]
    MissingApiKey,

    /// The tracker origin cannot address REST resources.
    #[error("Tracker origin '{origin}' cannot be used as a base URL")]
    InvalidOrigin { origin: String },

    /// The host has no bug to operate on.
    #[error("No bug is loaded")]
    NoRecord,
}
