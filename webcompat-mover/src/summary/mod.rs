//! Attempt summary types.

mod attempt;
mod outcome;

pub use attempt::AttemptSummary;
pub use outcome::MigrationOutcome;
