//! Version resolution error types.

use thiserror::Error;

/// Errors that can occur while looking up the current nightly version.
#[derive(Debug, Error)]
pub enum VersionError {
    /// The release-metadata request failed or returned unreadable JSON.
    #[error("Release metadata request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The configured endpoint cannot address a metadata document.
    #[error("Invalid release metadata endpoint: {0}")]
    Endpoint(#[from] url::ParseError),

    /// The release-metadata service answered with an error status.
    #[error("Release metadata service returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    /// The response did not contain the expected channel key.
    #[error("Release metadata has no '{key}' entry")]
    MissingKey { key: &'static str },

    /// The channel key does not start with a version number.
    #[error("Release metadata '{key}' is not a version: '{value}'")]
    InvalidVersion { key: &'static str, value: String },
}
