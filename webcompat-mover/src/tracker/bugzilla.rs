//! Bugzilla REST API client.

use super::{FetchError, Resolution, SourceTracker, TrackerError};
use crate::record::{Comment, RecordStatus, SourceRecord};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, info_span, Instrument};
use url::Url;

/// Fields requested when reading a bug.
pub const INCLUDE_FIELDS: &str = "url,op_sys,platform,version,comments,status";

const API_KEY_HEADER: &str = "X-BUGZILLA-API-KEY";

#[derive(Debug, Deserialize)]
struct BugList {
    #[serde(default)]
    bugs: Vec<BugFields>,
}

#[derive(Debug, Deserialize)]
struct BugFields {
    url: Option<String>,
    op_sys: Option<String>,
    platform: Option<String>,
    version: Option<String>,
    status: Option<RecordStatus>,
    #[serde(default)]
    comments: Vec<Comment>,
}

impl BugFields {
    fn into_record(self, id: &str) -> SourceRecord {
        SourceRecord {
            id: id.to_string(),
            url: self.url,
            op_sys: self.op_sys,
            platform: self.platform,
            version: self.version,
            status: self
                .status
                .unwrap_or_else(|| RecordStatus::Other(String::new())),
            comments: self.comments,
        }
    }
}

/// Changes applied to a bug in one `PUT /rest/bug/<id>` request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BugUpdate {
    #[serde(skip_serializing_if = "SeeAlsoChange::is_empty")]
    pub see_also: SeeAlsoChange,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RecordStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<Resolution>,
}

/// URLs to add to a bug's "see also" list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeeAlsoChange {
    pub add: Vec<String>,
}

impl SeeAlsoChange {
    fn is_empty(&self) -> bool {
        self.add.is_empty()
    }
}

impl BugUpdate {
    /// True when there is nothing to send.
    pub fn is_empty(&self) -> bool {
        self.see_also.is_empty() && self.status.is_none() && self.resolution.is_none()
    }
}

/// Reads and updates bugs through the Bugzilla REST API.
#[derive(Debug, Clone)]
pub struct BugzillaClient {
    http: reqwest::Client,
    origin: Url,
    api_key: Option<String>,
}

impl BugzillaClient {
    /// Creates a client for the tracker at `origin`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Request`] if the HTTP client cannot be built.
    pub fn new(origin: Url, api_key: Option<String>, timeout: Duration) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            origin,
            api_key,
        })
    }

    /// REST URL for a bug, e.g. `https://bugzilla.mozilla.org/rest/bug/1234`.
    fn bug_url(&self, id: &str) -> Option<Url> {
        let mut url = self.origin.clone();
        url.path_segments_mut()
            .ok()?
            .pop_if_empty()
            .extend(["rest", "bug", id]);
        Some(url)
    }

    fn with_api_key(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.header(API_KEY_HEADER, key),
            None => request,
        }
    }

    /// Applies `update` to bug `id`.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError`] if no API key is configured or the tracker
    /// rejects the request.
    pub async fn update_bug(&self, id: &str, update: &BugUpdate) -> Result<(), TrackerError> {
        if self.api_key.is_none() {
            return Err(TrackerError::MissingApiKey);
        }

        let url = self.bug_url(id).ok_or_else(|| TrackerError::InvalidOrigin {
            origin: self.origin.to_string(),
        })?;
        let span = info_span!("update_bug", bug_id = %id);

        async {
            debug!(?update, "Updating bug");
            let response = self
                .with_api_key(self.http.put(url))
                .json(update)
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                return Err(TrackerError::Status {
                    id: id.to_string(),
                    status: status.as_u16(),
                });
            }

            info!("Bug updated");
            Ok(())
        }
        .instrument(span)
        .await
    }
}

#[async_trait]
impl SourceTracker for BugzillaClient {
    async fn fetch_record(&self, id: &str) -> Result<SourceRecord, FetchError> {
        let mut url = self.bug_url(id).ok_or_else(|| FetchError::InvalidOrigin {
            origin: self.origin.to_string(),
        })?;
        url.query_pairs_mut()
            .append_pair("include_fields", INCLUDE_FIELDS);
        let span = info_span!("fetch_record", bug_id = %id);

        async {
            debug!(url = %url, "Fetching bug");
            let response = self.with_api_key(self.http.get(url)).send().await?;

            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::Status {
                    id: id.to_string(),
                    status: status.as_u16(),
                });
            }

            let body = response.text().await?;
            parse_bug_response(&body, id)
        }
        .instrument(span)
        .await
    }
}

fn record_from_list(list: BugList, id: &str) -> Result<SourceRecord, FetchError> {
    list.bugs
        .into_iter()
        .next()
        .map(|bug| bug.into_record(id))
        .ok_or_else(|| FetchError::NotFound { id: id.to_string() })
}

/// Parses a `GET /rest/bug/<id>` response body into the record for `id`.
///
/// # Errors
///
/// Returns [`FetchError::Decode`] for malformed JSON and
/// [`FetchError::NotFound`] when the body lists no bugs.
pub fn parse_bug_response(body: &str, id: &str) -> Result<SourceRecord, FetchError> {
    let list: BugList = serde_json::from_str(body)?;
    record_from_list(list, id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(origin: &str) -> BugzillaClient {
        BugzillaClient::new(
            Url::parse(origin).unwrap(),
            None,
            Duration::from_secs(1),
        )
        .unwrap()
    }

    #[test]
    fn builds_rest_urls() {
        let flat = client("https://bugzilla.mozilla.org");
        assert_eq!(
            flat.bug_url("1234").unwrap().as_str(),
            "https://bugzilla.mozilla.org/rest/bug/1234"
        );

        let nested = client("https://example.com/bugzilla/");
        assert_eq!(
            nested.bug_url("1234").unwrap().as_str(),
            "https://example.com/bugzilla/rest/bug/1234"
        );
    }

    #[test]
    fn bug_id_is_one_path_segment() {
        let client = client("https://bugzilla.mozilla.org");
        assert_eq!(
            client.bug_url("12/../34").unwrap().as_str(),
            "https://bugzilla.mozilla.org/rest/bug/12%2F..%2F34"
        );
    }

    #[test]
    fn empty_bug_list_is_not_found() {
        let list: BugList = serde_json::from_str(r#"{"bugs": []}"#).unwrap();
        assert!(matches!(
            record_from_list(list, "1"),
            Err(FetchError::NotFound { .. })
        ));

        let list: BugList = serde_json::from_str(r#"{"faults": []}"#).unwrap();
        assert!(matches!(
            record_from_list(list, "1"),
            Err(FetchError::NotFound { .. })
        ));
    }

    #[test]
    fn null_fields_are_unset() {
        let list: BugList = serde_json::from_str(
            r#"{"bugs": [{"url": "", "op_sys": null, "version": "Trunk", "status": "NEW"}]}"#,
        )
        .unwrap();

        let record = record_from_list(list, "7").unwrap();
        assert_eq!(record.id, "7");
        assert_eq!(record.url.as_deref(), Some(""));
        assert_eq!(record.op_sys, None);
        assert_eq!(record.status, RecordStatus::New);
        assert!(record.comments.is_empty());
    }

    #[test]
    fn update_serializes_only_set_fields() {
        let update = BugUpdate {
            see_also: SeeAlsoChange {
                add: vec!["https://webcompat.com/issues/1".to_string()],
            },
            status: Some(RecordStatus::Resolved),
            resolution: Some(Resolution::Moved),
        };

        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            serde_json::json!({
                "see_also": {"add": ["https://webcompat.com/issues/1"]},
                "status": "RESOLVED",
                "resolution": "MOVED"
            })
        );
        assert_eq!(
            serde_json::to_value(BugUpdate::default()).unwrap(),
            serde_json::json!({})
        );
    }

    #[tokio::test]
    async fn update_requires_api_key() {
        let client = client("https://bugzilla.mozilla.org");
        let result = client.update_bug("1", &BugUpdate::default()).await;
        assert!(matches!(result, Err(TrackerError::MissingApiKey)));
    }
}
