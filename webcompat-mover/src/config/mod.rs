//! Mover configuration.
//!
//! Every endpoint the mover talks to can be overridden from a `config.toml`
//! file. All keys are optional; a missing file section falls back to the
//! production endpoints.
//!
//! ```toml
//! tracker-origin = "https://bugzilla.mozilla.org"
//! intake-endpoint = "https://webcompat.com/issues/new"
//! product-details-endpoint = "https://product-details.mozilla.org/1.0/"
//! fallback-message-format = "More information is available on {{bug_url}}"
//! timeout-secs = 30
//! ```

mod error;

pub use error::ConfigError;

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Environment variable consulted when no `api-key` is configured.
pub const API_KEY_ENV: &str = "BUGZILLA_API_KEY";

const DEFAULT_TRACKER_ORIGIN: &str = "https://bugzilla.mozilla.org";
const DEFAULT_INTAKE_ENDPOINT: &str = "https://webcompat.com/issues/new";
const DEFAULT_PRODUCT_DETAILS_ENDPOINT: &str = "https://product-details.mozilla.org/1.0/";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Raw `config.toml` contents before validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct ConfigFile {
    tracker_origin: Option<String>,
    intake_endpoint: Option<String>,
    product_details_endpoint: Option<String>,
    api_key: Option<String>,
    fallback_message_format: Option<String>,
    description_format: Option<String>,
    timeout_secs: Option<u64>,
}

fn default_fallback_message_format() -> String {
    "More information is available on {{bug_url}}".to_string()
}

fn default_description_format() -> String {
    "Moved from bugzilla".to_string()
}

/// Validated configuration for a migration run.
#[derive(Debug, Clone)]
pub struct MoverConfig {
    tracker_origin: Url,
    intake_endpoint: Url,
    product_details_endpoint: Url,
    api_key: Option<String>,
    fallback_message_format: String,
    description_format: String,
    timeout: Duration,
}

impl MoverConfig {
    /// Builds the configuration used when no file is given.
    ///
    /// # Errors
    ///
    /// Only fails if a built-in endpoint does not parse as a URL.
    pub fn production() -> Result<Self, ConfigError> {
        Self::from_file(ConfigFile::default())
    }

    /// Loads the configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file is missing, unreadable, not valid
    /// TOML, or contains an invalid URL.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        info!(path = %path.display(), "Loading config");

        if !path.exists() {
            return Err(ConfigError::MissingFile {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::from_toml_str(&content, &path.display().to_string())
    }

    /// Parses configuration from TOML text. `origin` only labels errors.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] on malformed TOML or invalid values.
    pub fn from_toml_str(content: &str, origin: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(content).map_err(|e| ConfigError::TomlError {
            path: origin.to_string(),
            source: e,
        })?;
        let config = Self::from_file(file)?;
        debug!(tracker_origin = %config.tracker_origin, "Parsed config");
        Ok(config)
    }

    fn from_file(file: ConfigFile) -> Result<Self, ConfigError> {
        let tracker_origin = parse_url(
            "tracker-origin",
            file.tracker_origin.as_deref().unwrap_or(DEFAULT_TRACKER_ORIGIN),
        )?;
        let intake_endpoint = parse_url(
            "intake-endpoint",
            file.intake_endpoint.as_deref().unwrap_or(DEFAULT_INTAKE_ENDPOINT),
        )?;
        let product_details_endpoint = parse_directory_url(
            "product-details-endpoint",
            file.product_details_endpoint
                .as_deref()
                .unwrap_or(DEFAULT_PRODUCT_DETAILS_ENDPOINT),
        )?;

        let timeout_secs = file.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(ConfigError::ValidationError {
                key: "timeout-secs",
                message: "must be greater than zero".to_string(),
            });
        }

        Ok(Self {
            tracker_origin,
            intake_endpoint,
            product_details_endpoint,
            api_key: file.api_key.filter(|key| !key.trim().is_empty()),
            fallback_message_format: file
                .fallback_message_format
                .unwrap_or_else(default_fallback_message_format),
            description_format: file
                .description_format
                .unwrap_or_else(default_description_format),
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Overrides the tracker origin (e.g. from the command line).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if `origin` is not a URL.
    pub fn with_tracker_origin(mut self, origin: &str) -> Result<Self, ConfigError> {
        self.tracker_origin = parse_url("tracker-origin", origin)?;
        Ok(self)
    }

    /// Overrides the tracker API key.
    pub fn with_api_key(mut self, api_key: String) -> Self {
        self.api_key = Some(api_key);
        self
    }

    /// Origin of the source tracker, e.g. `https://bugzilla.mozilla.org`.
    pub fn tracker_origin(&self) -> &Url {
        &self.tracker_origin
    }

    /// Endpoint receiving new reports.
    pub fn intake_endpoint(&self) -> &Url {
        &self.intake_endpoint
    }

    /// Base URL of the release-metadata service.
    pub fn product_details_endpoint(&self) -> &Url {
        &self.product_details_endpoint
    }

    /// Returns the configured API key, falling back to [`API_KEY_ENV`].
    pub fn api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .filter(|key| !key.trim().is_empty())
    }

    /// Handlebars format of the steps text used when the bug has no description.
    pub fn fallback_message_format(&self) -> &str {
        &self.fallback_message_format
    }

    /// Handlebars format of the report description.
    pub fn description_format(&self) -> &str {
        &self.description_format
    }

    /// Per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

fn parse_url(key: &'static str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value).map_err(|e| ConfigError::ValidationError {
        key,
        message: format!("'{value}' is not a valid URL: {e}"),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::ValidationError {
            key,
            message: format!("'{value}' must use http or https"),
        });
    }

    Ok(url)
}

/// Parses a URL that other paths get joined onto, so it must end in `/`.
fn parse_directory_url(key: &'static str, value: &str) -> Result<Url, ConfigError> {
    if value.ends_with('/') {
        parse_url(key, value)
    } else {
        parse_url(key, &format!("{value}/"))
    }
}
