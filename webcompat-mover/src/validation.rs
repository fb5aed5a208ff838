//! Checks a bug for required fields before it is moved.

use crate::record::{MissingFieldReport, RequiredFieldSpec, SourceRecord};

/// Value the tracker uses for a field nobody has filled in.
const UNSPECIFIED: &str = "unspecified";

/// Lists required fields that are unset on `record`.
///
/// A field is unset when it is absent, empty, or equal to "unspecified" in
/// any case. The report follows the order of `spec`.
pub fn find_missing_required(record: &SourceRecord, spec: &RequiredFieldSpec) -> MissingFieldReport {
    let mut report = MissingFieldReport::default();

    for (field, description) in spec.iter() {
        let unset = match record.field(field) {
            None => true,
            Some(value) => value.is_empty() || value.eq_ignore_ascii_case(UNSPECIFIED),
        };

        if unset {
            report.push(description);
        }
    }

    report
}
