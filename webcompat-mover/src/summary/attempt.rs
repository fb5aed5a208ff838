//! Summary of one move attempt.

use super::MigrationOutcome;
use crate::coordinator::MigrationState;

/// What happened during one move attempt.
#[derive(Debug)]
pub struct AttemptSummary {
    /// Bug the attempt worked on, if one was identified.
    pub record_id: Option<String>,

    /// States entered, in order.
    pub states: Vec<MigrationState>,

    /// How the attempt ended.
    pub outcome: MigrationOutcome,
}

impl AttemptSummary {
    /// Returns true if the bug was moved.
    #[must_use]
    pub fn is_moved(&self) -> bool {
        matches!(self.outcome, MigrationOutcome::Moved { .. })
    }

    /// Returns true if the attempt failed (missing fields are not a failure).
    #[must_use]
    pub fn has_failure(&self) -> bool {
        matches!(self.outcome, MigrationOutcome::Failed(_))
    }

    /// Returns true if the attempt entered `state`.
    #[must_use]
    pub fn visited(&self, state: MigrationState) -> bool {
        self.states.contains(&state)
    }

    /// Last state entered.
    #[must_use]
    pub fn final_state(&self) -> MigrationState {
        self.states.last().copied().unwrap_or(MigrationState::Idle)
    }
}
