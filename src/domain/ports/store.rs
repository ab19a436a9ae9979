use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::entities::alert::ProactiveAlert;
use crate::domain::entities::counts::SymptomTally;
use crate::domain::entities::report::SymptomReport;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage read failed: {0}")]
    ReadFailed(String),
    #[error("storage write failed: {0}")]
    WriteFailed(String),
    #[error("invalid stored record: {0}")]
    InvalidRecord(String),
}

/// Read side of the report store, as seen by the cluster detector.
pub trait ReportSource: Send + Sync {
    /// Group the reports created within `[start, end)` by location and
    /// symptom, returning one tally per pair.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the aggregation cannot be read.
    fn symptom_tallies(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<SymptomTally>, StoreError>;
}

/// Write side of the report store: citizen submissions and retention.
pub trait ReportStore: Send + Sync {
    /// Persist a citizen report.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the write operation fails.
    fn save_report(&self, report: &SymptomReport) -> Result<(), StoreError>;

    /// Delete reports created before `cutoff`, returning how many were removed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the deletion fails.
    fn purge_reports_before(&self, cutoff: DateTime<Utc>) -> Result<usize, StoreError>;
}

/// Append-only sink for proactive alerts.
pub trait AlertSink: Send + Sync {
    /// Persist an alert. Plain append, no read-modify-write.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the write operation fails.
    fn save_alert(&self, alert: &ProactiveAlert) -> Result<(), StoreError>;

    /// Retrieve the most recent alerts, newest first, up to `count`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the read operation fails.
    fn get_recent_alerts(&self, count: usize) -> Result<Vec<ProactiveAlert>, StoreError>;
}
