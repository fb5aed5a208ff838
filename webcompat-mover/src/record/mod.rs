//! Source bug records and the fields a move requires.

mod required;
mod status;

pub use required::{MissingFieldReport, RequiredField, RequiredFieldSpec};
pub use status::RecordStatus;

use serde::{Deserialize, Serialize};

/// A single bug comment. The first comment is the bug description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Comment body.
    #[serde(default)]
    pub text: String,
}

impl Comment {
    /// Creates a comment with the given body.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// A bug fetched from the source tracker for one move attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRecord {
    /// Bug identifier on the source tracker.
    pub id: String,

    /// Site URL the bug is about.
    pub url: Option<String>,

    /// Operating system label (e.g. "Windows 10", "Unspecified").
    pub op_sys: Option<String>,

    /// Hardware platform label (e.g. "x86_64", "ARM").
    pub platform: Option<String>,

    /// Version label (e.g. "Firefox 85", "Trunk").
    pub version: Option<String>,

    /// Lifecycle state.
    pub status: RecordStatus,

    /// Comments in chronological order.
    pub comments: Vec<Comment>,
}

impl SourceRecord {
    /// Creates an open record with no fields set.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: None,
            op_sys: None,
            platform: None,
            version: None,
            status: RecordStatus::New,
            comments: Vec::new(),
        }
    }

    /// Returns the value of a required field, if set.
    pub fn field(&self, field: RequiredField) -> Option<&str> {
        match field {
            RequiredField::OpSys => self.op_sys.as_deref(),
            RequiredField::Url => self.url.as_deref(),
            RequiredField::Version => self.version.as_deref(),
        }
    }
}
