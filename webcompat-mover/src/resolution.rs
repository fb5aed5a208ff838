//! Marks a moved bug as resolved.

use crate::record::SourceRecord;
use crate::tracker::{HostTrackerAdapter, Resolution, TrackerError};
use tracing::{info, info_span, warn, Instrument};

/// Drives a bug to RESOLVED MOVED with a see-also link to its new home.
pub struct ResolutionDriver;

impl ResolutionDriver {
    /// Edits `record` on the host: edit mode, see-also, resolution, save.
    ///
    /// Success is not verified. A failing step is logged and the remaining
    /// steps are skipped; the host owns recovery.
    pub async fn resolve_as_moved(
        host: &dyn HostTrackerAdapter,
        record: &SourceRecord,
        cross_reference: &str,
    ) {
        let span = info_span!("resolve_as_moved", bug_id = %record.id, cross_reference);

        async {
            match Self::apply(host, cross_reference).await {
                Ok(()) => info!("Bug resolved as moved"),
                Err(e) => warn!(error = %e, "Failed to resolve bug as moved"),
            }
        }
        .instrument(span)
        .await
    }

    async fn apply(host: &dyn HostTrackerAdapter, cross_reference: &str) -> Result<(), TrackerError> {
        host.engage_edit_mode().await?;
        host.add_see_also(cross_reference).await?;
        host.set_resolution(Resolution::Moved).await?;
        host.save_changes().await
    }
}
