//! In-memory collaborators for driving the coordinator in tests.

#![allow(dead_code)]

pub mod server;

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use webcompat_mover::{
    CoordinatorOptions, FetchError, HostTrackerAdapter, IntakeEndpoint, MigrationCoordinator,
    MoverConfig, Notification, ReleaseChannel, ReleaseMetadata, Resolution, SourceRecord,
    SourceTracker, SubmissionError, TargetSubmission, TrackerError, VersionError,
};

pub const REPORT_URL: &str = "https://webcompat.com/issues/64000";

/// Something a collaborator was asked to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Trigger(bool),
    Fetch(String),
    Nightly(ReleaseChannel),
    Submit(TargetSubmission),
    EditMode,
    SeeAlso(String),
    Resolution(Resolution),
    Save,
    Notify(Notification),
}

#[derive(Debug, Clone, Default)]
pub struct EventLog(Arc<Mutex<Vec<Event>>>);

impl EventLog {
    fn push(&self, event: Event) {
        self.0.lock().unwrap().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self, matches: impl Fn(&Event) -> bool) -> usize {
        self.events().iter().filter(|event| matches(event)).count()
    }

    pub fn submissions(&self) -> Vec<TargetSubmission> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Submit(submission) => Some(submission),
                _ => None,
            })
            .collect()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Notify(notification) => Some(notification),
                _ => None,
            })
            .collect()
    }
}

pub struct FakeHost {
    bug_id: Option<String>,
    log: EventLog,
    trigger_enabled: AtomicBool,
    fail_save: bool,
}

impl FakeHost {
    pub fn trigger_enabled(&self) -> bool {
        self.trigger_enabled.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HostTrackerAdapter for FakeHost {
    fn record_identifier(&self) -> Option<String> {
        self.bug_id.clone()
    }

    async fn engage_edit_mode(&self) -> Result<(), TrackerError> {
        self.log.push(Event::EditMode);
        Ok(())
    }

    async fn add_see_also(&self, url: &str) -> Result<(), TrackerError> {
        self.log.push(Event::SeeAlso(url.to_string()));
        Ok(())
    }

    async fn set_resolution(&self, resolution: Resolution) -> Result<(), TrackerError> {
        self.log.push(Event::Resolution(resolution));
        Ok(())
    }

    async fn save_changes(&self) -> Result<(), TrackerError> {
        self.log.push(Event::Save);
        if self.fail_save {
            return Err(TrackerError::MissingApiKey);
        }
        Ok(())
    }

    fn show_notification(&self, notification: &Notification) {
        self.log.push(Event::Notify(notification.clone()));
    }

    fn set_trigger_enabled(&self, enabled: bool) {
        self.log.push(Event::Trigger(enabled));
        self.trigger_enabled.store(enabled, Ordering::SeqCst);
    }
}

struct FakeTracker {
    record: Option<SourceRecord>,
    log: EventLog,
}

#[async_trait]
impl SourceTracker for FakeTracker {
    async fn fetch_record(&self, id: &str) -> Result<SourceRecord, FetchError> {
        self.log.push(Event::Fetch(id.to_string()));
        self.record
            .clone()
            .ok_or_else(|| FetchError::NotFound { id: id.to_string() })
    }
}

struct FakeMetadata {
    fail: bool,
    log: EventLog,
}

#[async_trait]
impl ReleaseMetadata for FakeMetadata {
    async fn nightly_version(&self, channel: ReleaseChannel) -> Result<String, VersionError> {
        self.log.push(Event::Nightly(channel));
        if self.fail {
            return Err(VersionError::Status {
                status: 503,
                url: "https://product-details.mozilla.org/1.0/".to_string(),
            });
        }
        Ok(match channel {
            ReleaseChannel::Desktop => "86.0a1".to_string(),
            ReleaseChannel::Mobile => "84.0a1".to_string(),
        })
    }
}

struct FakeIntake {
    fail: bool,
    log: EventLog,
}

#[async_trait]
impl IntakeEndpoint for FakeIntake {
    async fn submit(&self, submission: &TargetSubmission) -> Result<String, SubmissionError> {
        self.log.push(Event::Submit(submission.clone()));
        if self.fail {
            return Err(SubmissionError::Status { status: 500 });
        }
        Ok(REPORT_URL.to_string())
    }
}

/// A complete, open bug that can be moved.
pub fn movable_record() -> SourceRecord {
    SourceRecord {
        url: Some("https://example.com/checkout".to_string()),
        op_sys: Some("Windows 10".to_string()),
        platform: Some("x86_64".to_string()),
        version: Some("Firefox 85".to_string()),
        comments: vec![webcompat_mover::Comment::new("Click checkout, nothing happens.")],
        ..SourceRecord::new("1680000")
    }
}

/// Describes collaborator behaviour for one test.
pub struct Scenario {
    pub bug_id: Option<String>,
    pub record: Option<SourceRecord>,
    pub metadata_fails: bool,
    pub intake_fails: bool,
    pub save_fails: bool,
    pub dry_run: bool,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            bug_id: Some("1680000".to_string()),
            record: Some(movable_record()),
            metadata_fails: false,
            intake_fails: false,
            save_fails: false,
            dry_run: false,
        }
    }
}

pub struct Harness {
    pub log: EventLog,
    pub host: Arc<FakeHost>,
    pub coordinator: MigrationCoordinator,
}

impl Scenario {
    pub fn build(self) -> Harness {
        let log = EventLog::default();
        let host = Arc::new(FakeHost {
            bug_id: self.bug_id,
            log: log.clone(),
            trigger_enabled: AtomicBool::new(true),
            fail_save: self.save_fails,
        });
        let tracker = Arc::new(FakeTracker {
            record: self.record,
            log: log.clone(),
        });
        let metadata = Arc::new(FakeMetadata {
            fail: self.metadata_fails,
            log: log.clone(),
        });
        let intake = Arc::new(FakeIntake {
            fail: self.intake_fails,
            log: log.clone(),
        });

        let config = MoverConfig::production().unwrap();
        let options = CoordinatorOptions::from_config(&config).with_dry_run(self.dry_run);
        let coordinator =
            MigrationCoordinator::new(host.clone(), tracker, metadata, intake, options).unwrap();

        Harness {
            log,
            host,
            coordinator,
        }
    }
}
