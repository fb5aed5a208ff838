//! Release-metadata lookups for the current nightly version.

use super::VersionError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info_span, Instrument};
use url::Url;

/// Which product-details document to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseChannel {
    Desktop,
    Mobile,
}

impl ReleaseChannel {
    /// Document name under the product-details endpoint.
    pub fn document(self) -> &'static str {
        match self {
            Self::Desktop => "firefox_versions.json",
            Self::Mobile => "mobile_versions.json",
        }
    }

    /// Key holding the nightly version in that document.
    pub fn nightly_key(self) -> &'static str {
        match self {
            Self::Desktop => "FIREFOX_NIGHTLY",
            Self::Mobile => "nightly_version",
        }
    }
}

/// Source of the current nightly version for a channel.
#[async_trait]
pub trait ReleaseMetadata: Send + Sync {
    /// Returns the raw nightly version, e.g. `"86.0a1"`.
    async fn nightly_version(&self, channel: ReleaseChannel) -> Result<String, VersionError>;
}

/// Reads nightly versions from product-details.mozilla.org.
#[derive(Debug, Clone)]
pub struct ProductDetailsClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl ProductDetailsClient {
    /// Creates a client for the given endpoint (which must end in `/`).
    ///
    /// # Errors
    ///
    /// Returns [`VersionError::Request`] if the HTTP client cannot be built.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, VersionError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, endpoint })
    }

    fn document_url(&self, channel: ReleaseChannel) -> Result<Url, VersionError> {
        Ok(self.endpoint.join(channel.document())?)
    }
}

#[async_trait]
impl ReleaseMetadata for ProductDetailsClient {
    async fn nightly_version(&self, channel: ReleaseChannel) -> Result<String, VersionError> {
        let url = self.document_url(channel)?;
        let span = info_span!("nightly_version", url = %url);

        async {
            debug!("Requesting release metadata");
            let response = self.http.get(url.clone()).send().await?;

            let status = response.status();
            if !status.is_success() {
                return Err(VersionError::Status {
                    status: status.as_u16(),
                    url: url.to_string(),
                });
            }

            let versions: HashMap<String, serde_json::Value> = response.json().await?;
            nightly_from_document(&versions, channel)
        }
        .instrument(span)
        .await
    }
}

/// Picks the channel's nightly entry out of a product-details document.
pub(crate) fn nightly_from_document(
    versions: &HashMap<String, serde_json::Value>,
    channel: ReleaseChannel,
) -> Result<String, VersionError> {
    let key = channel.nightly_key();
    match versions.get(key) {
        Some(serde_json::Value::String(version)) => Ok(version.clone()),
        Some(other) => Err(VersionError::InvalidVersion {
            key,
            value: other.to_string(),
        }),
        None => Err(VersionError::MissingKey { key }),
    }
}
