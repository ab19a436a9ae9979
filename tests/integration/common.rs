use std::sync::Mutex;

use chrono::{DateTime, TimeDelta, Utc};
use serde::Deserialize;

use epiwatch::domain::entities::alert::ProactiveAlert;
use epiwatch::domain::entities::report::SymptomReport;
use epiwatch::domain::ports::notifier::{NotificationError, Notifier};
use epiwatch::domain::ports::store::ReportStore;

/// One line of a report fixture: `count` identical reports submitted
/// `hours_ago` hours before the test clock.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportBatch {
    pub location: String,
    pub symptoms: Vec<String>,
    pub count: usize,
    pub hours_ago: i64,
}

pub fn load_fixture(name: &str) -> Vec<ReportBatch> {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    let json = std::fs::read_to_string(&path).expect("Failed to read fixture");
    serde_json::from_str(&json).expect("Failed to parse fixture")
}

pub fn seed(store: &dyn ReportStore, batches: &[ReportBatch], now: DateTime<Utc>) {
    for batch in batches {
        let at = now - TimeDelta::hours(batch.hours_ago);
        for _ in 0..batch.count {
            let report =
                SymptomReport::new(&batch.location, &batch.symptoms, at).expect("fixture report");
            store.save_report(&report).expect("save report");
        }
    }
}

pub fn seed_fixture(store: &dyn ReportStore, name: &str, now: DateTime<Utc>) {
    seed(store, &load_fixture(name), now);
}

/// Records every alert it is asked to broadcast.
pub struct TrackingNotifier {
    alerts: Mutex<Vec<ProactiveAlert>>,
}

impl TrackingNotifier {
    pub const fn new() -> Self {
        Self {
            alerts: Mutex::new(vec![]),
        }
    }

    pub fn collected(&self) -> Vec<ProactiveAlert> {
        self.alerts.lock().expect("lock").clone()
    }
}

impl Notifier for TrackingNotifier {
    fn notify(&self, alert: &ProactiveAlert) -> Result<(), NotificationError> {
        self.alerts.lock().expect("lock").push(alert.clone());
        Ok(())
    }
}

/// A broadcast channel that is always down.
pub struct DeadChannel;

impl Notifier for DeadChannel {
    fn notify(&self, _alert: &ProactiveAlert) -> Result<(), NotificationError> {
        Err(NotificationError::ChannelUnavailable("socket hub offline".into()))
    }
}
