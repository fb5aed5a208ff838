//! Headless host that edits bugs through the REST API.

use super::{BugUpdate, BugzillaClient, HostTrackerAdapter, Notification, Resolution, TrackerError};
use crate::record::RecordStatus;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info};

/// A [`HostTrackerAdapter`] for running outside the tracker's web UI.
///
/// Edits are collected between [`engage_edit_mode`] and [`save_changes`] and
/// sent as one update. Notifications are kept so the caller can print them.
///
/// [`engage_edit_mode`]: HostTrackerAdapter::engage_edit_mode
/// [`save_changes`]: HostTrackerAdapter::save_changes
#[derive(Debug)]
pub struct RestHost {
    client: BugzillaClient,
    bug_id: Option<String>,
    pending: Mutex<BugUpdate>,
    trigger_enabled: AtomicBool,
    notifications: Mutex<Vec<Notification>>,
}

impl RestHost {
    /// Creates a host viewing `bug_id`. A blank id counts as no id.
    pub fn new(client: BugzillaClient, bug_id: Option<String>) -> Self {
        Self {
            client,
            bug_id: bug_id
                .map(|id| id.trim().to_string())
                .filter(|id| !id.is_empty()),
            pending: Mutex::new(BugUpdate::default()),
            trigger_enabled: AtomicBool::new(true),
            notifications: Mutex::new(Vec::new()),
        }
    }

    /// Whether the move trigger is currently enabled.
    pub fn trigger_enabled(&self) -> bool {
        self.trigger_enabled.load(Ordering::SeqCst)
    }

    /// Notifications shown so far, oldest first.
    pub fn notifications(&self) -> Vec<Notification> {
        lock(&self.notifications).clone()
    }

    /// Edits not yet saved.
    pub fn pending_update(&self) -> BugUpdate {
        lock(&self.pending).clone()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl HostTrackerAdapter for RestHost {
    fn record_identifier(&self) -> Option<String> {
        self.bug_id.clone()
    }

    async fn engage_edit_mode(&self) -> Result<(), TrackerError> {
        debug!("Starting a new bug edit");
        *lock(&self.pending) = BugUpdate::default();
        Ok(())
    }

    async fn add_see_also(&self, url: &str) -> Result<(), TrackerError> {
        lock(&self.pending).see_also.add.push(url.to_string());
        Ok(())
    }

    async fn set_resolution(&self, resolution: Resolution) -> Result<(), TrackerError> {
        let mut pending = lock(&self.pending);
        pending.status = Some(RecordStatus::Resolved);
        pending.resolution = Some(resolution);
        Ok(())
    }

    async fn save_changes(&self) -> Result<(), TrackerError> {
        let id = self.bug_id.as_deref().ok_or(TrackerError::NoRecord)?;
        let update = std::mem::take(&mut *lock(&self.pending));

        if update.is_empty() {
            debug!("No pending edits");
            return Ok(());
        }

        self.client.update_bug(id, &update).await
    }

    fn show_notification(&self, notification: &Notification) {
        info!(text = %notification.text, items = notification.items.len(), "Notification");
        lock(&self.notifications).push(notification.clone());
    }

    fn set_trigger_enabled(&self, enabled: bool) {
        debug!(enabled, "Move trigger");
        self.trigger_enabled.store(enabled, Ordering::SeqCst);
    }
}
