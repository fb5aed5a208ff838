//! Reproduction steps for the new report.

use crate::record::Comment;

/// Returns the bug description (first comment), or `fallback` when there is
/// no description or it is empty.
pub fn extract_steps(comments: &[Comment], fallback: &str) -> String {
    match comments.first() {
        Some(first) if !first.text.is_empty() => first.text.clone(),
        _ => fallback.to_string(),
    }
}
