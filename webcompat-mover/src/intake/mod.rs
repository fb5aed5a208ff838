//! Report submission to webcompat.com.

mod error;
mod submission;

pub use error::SubmissionError;
pub use submission::{TargetSubmission, PROBLEM_CATEGORY, SOURCE_TAG, SUBMIT_TYPE};

use async_trait::async_trait;
use reqwest::multipart::Form;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, info_span, Instrument};
use url::Url;

/// Receives reports and says where the new report lives.
#[async_trait]
pub trait IntakeEndpoint: Send + Sync {
    /// Submits `submission` and returns the URL of the created report.
    async fn submit(&self, submission: &TargetSubmission) -> Result<String, SubmissionError>;
}

#[derive(Debug, Deserialize)]
struct IntakeResponse {
    url: Option<String>,
}

/// Posts reports to the webcompat.com new-issue endpoint.
#[derive(Debug, Clone)]
pub struct WebcompatClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl WebcompatClient {
    /// Creates a client posting to `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionError::Request`] if the HTTP client cannot be built.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, SubmissionError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, endpoint })
    }
}

#[async_trait]
impl IntakeEndpoint for WebcompatClient {
    async fn submit(&self, submission: &TargetSubmission) -> Result<String, SubmissionError> {
        let span = info_span!("submit", endpoint = %self.endpoint, url = %submission.url());

        async {
            let form = submission
                .form_fields()
                .into_iter()
                .fold(Form::new(), |form, (name, value)| {
                    form.text(name, value.to_string())
                });

            debug!("Posting report");
            let response = self
                .http
                .post(self.endpoint.clone())
                .header(reqwest::header::ACCEPT, "application/json")
                .multipart(form)
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                return Err(SubmissionError::Status {
                    status: status.as_u16(),
                });
            }

            let body: IntakeResponse = response.json().await?;
            let url = report_url(body)?;
            info!(report = %url, "Report created");
            Ok(url)
        }
        .instrument(span)
        .await
    }
}

fn report_url(body: IntakeResponse) -> Result<String, SubmissionError> {
    body.url
        .filter(|url| !url.trim().is_empty())
        .ok_or(SubmissionError::MissingUrl)
}
