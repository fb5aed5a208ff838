//! Source tracker access.
//!
//! The mover never touches the tracker directly. Reading a bug goes through
//! [`SourceTracker`]; everything the host tracker UI would otherwise do
//! (supplying the bug id, showing messages, toggling the move trigger,
//! editing the bug) goes through [`HostTrackerAdapter`].

mod bugzilla;
mod error;
mod rest_host;

pub use bugzilla::{parse_bug_response, BugUpdate, BugzillaClient, SeeAlsoChange, INCLUDE_FIELDS};
pub use error::{FetchError, TrackerError};
pub use rest_host::RestHost;

use crate::record::SourceRecord;
use async_trait::async_trait;
use serde::Serialize;
use std::fmt;

/// Reads bugs from the source tracker.
#[async_trait]
pub trait SourceTracker: Send + Sync {
    /// Fetches the current state of bug `id`.
    async fn fetch_record(&self, id: &str) -> Result<SourceRecord, FetchError>;
}

/// Resolution written to a bug once it has been moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Resolution {
    Moved,
}

impl Resolution {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Moved => "MOVED",
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message for the notification area, optionally with a list of items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub text: String,
    pub items: Vec<String>,
}

impl Notification {
    /// A plain text message.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            items: Vec::new(),
        }
    }

    /// A message followed by a list.
    pub fn with_items(text: impl Into<String>, items: Vec<String>) -> Self {
        Self {
            text: text.into(),
            items,
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)?;
        for item in &self.items {
            write!(f, "\n  - {item}")?;
        }
        Ok(())
    }
}

/// Capabilities the host tracker exposes to the mover.
#[async_trait]
pub trait HostTrackerAdapter: Send + Sync {
    /// Identifier of the bug being viewed, if any.
    fn record_identifier(&self) -> Option<String>;

    /// Switches the bug into edit mode.
    async fn engage_edit_mode(&self) -> Result<(), TrackerError>;

    /// Adds `url` to the bug's "see also" references.
    async fn add_see_also(&self, url: &str) -> Result<(), TrackerError>;

    /// Sets the bug's resolution (and with it, its resolved status).
    async fn set_resolution(&self, resolution: Resolution) -> Result<(), TrackerError>;

    /// Saves pending edits.
    async fn save_changes(&self) -> Result<(), TrackerError>;

    /// Replaces the notification area contents and opens it.
    fn show_notification(&self, notification: &Notification);

    /// Enables or disables the move trigger.
    fn set_trigger_enabled(&self, enabled: bool);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_display_lists_items() {
        let notification = Notification::with_items(
            "Please fill in the following:",
            vec!["URL (References > URL)".to_string()],
        );

        assert_eq!(
            notification.to_string(),
            "Please fill in the following:\n  - URL (References > URL)"
        );
    }

    #[test]
    fn resolution_serializes_as_tracker_value() {
        assert_eq!(serde_json::to_value(Resolution::Moved).unwrap(), "MOVED");
        assert_eq!(Resolution::Moved.to_string(), "MOVED");
    }
}
