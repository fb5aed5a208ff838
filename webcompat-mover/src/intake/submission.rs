//! The report sent to the intake endpoint.

use serde::Serialize;

/// Value of the `src` field identifying where reports come from.
pub const SOURCE_TAG: &str = "bugzilla";

/// Value of the `submit_type` field.
pub const SUBMIT_TYPE: &str = "github-proxy-report";

/// Value of the `problem_category` field.
pub const PROBLEM_CATEGORY: &str = "unknown_bug";

/// A report built from one bug. Reports are anonymous, so `username` is
/// always empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetSubmission {
    url: String,
    src: &'static str,
    submit_type: &'static str,
    problem_category: &'static str,
    browser: String,
    os: String,
    username: &'static str,
    description: String,
    steps_reproduce: String,
}

impl TargetSubmission {
    /// Builds a report with the fixed provenance fields filled in.
    pub fn new(
        url: String,
        browser: String,
        os: String,
        description: String,
        steps_reproduce: String,
    ) -> Self {
        Self {
            url,
            src: SOURCE_TAG,
            submit_type: SUBMIT_TYPE,
            problem_category: PROBLEM_CATEGORY,
            browser,
            os,
            username: "",
            description,
            steps_reproduce,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn browser(&self) -> &str {
        &self.browser
    }

    pub fn os(&self) -> &str {
        &self.os
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn steps_reproduce(&self) -> &str {
        &self.steps_reproduce
    }

    /// Form fields in submission order.
    pub fn form_fields(&self) -> [(&'static str, &str); 9] {
        [
            ("url", self.url.as_str()),
            ("src", self.src),
            ("submit_type", self.submit_type),
            ("problem_category", self.problem_category),
            ("browser", self.browser.as_str()),
            ("os", self.os.as_str()),
            ("username", self.username),
            ("description", self.description.as_str()),
            ("steps_reproduce", self.steps_reproduce.as_str()),
        ]
    }
}
