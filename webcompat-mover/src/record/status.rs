//! Bug lifecycle states.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Lifecycle state of a bug on the source tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordStatus {
    Unconfirmed,
    New,
    Assigned,
    Reopened,
    Resolved,
    Verified,
    Closed,
    /// A state this crate does not know about, kept verbatim.
    Other(String),
}

impl RecordStatus {
    /// Parses a status name, ignoring case.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "UNCONFIRMED" => Self::Unconfirmed,
            "NEW" => Self::New,
            "ASSIGNED" => Self::Assigned,
            "REOPENED" => Self::Reopened,
            "RESOLVED" => Self::Resolved,
            "VERIFIED" => Self::Verified,
            "CLOSED" => Self::Closed,
            _ => Self::Other(value.to_string()),
        }
    }

    /// Returns the tracker's name for this state.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Unconfirmed => "UNCONFIRMED",
            Self::New => "NEW",
            Self::Assigned => "ASSIGNED",
            Self::Reopened => "REOPENED",
            Self::Resolved => "RESOLVED",
            Self::Verified => "VERIFIED",
            Self::Closed => "CLOSED",
            Self::Other(value) => value,
        }
    }

    /// Returns true once the bug has a resolution.
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved | Self::Verified | Self::Closed)
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for RecordStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RecordStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(Self::parse(&value))
    }
}
