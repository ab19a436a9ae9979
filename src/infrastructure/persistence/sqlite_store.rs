use std::path::PathBuf;
use std::sync::Mutex;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection};

use crate::domain::entities::alert::{AlertKind, ProactiveAlert};
use crate::domain::entities::counts::SymptomTally;
use crate::domain::entities::report::SymptomReport;
use crate::domain::ports::store::{AlertSink, ReportSource, ReportStore, StoreError};
use crate::domain::value_objects::location::Location;
use crate::domain::value_objects::severity::Severity;
use crate::domain::value_objects::symptom::Symptom;

use super::migrations;

/// SQLite-backed persistent store for reports and alerts.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

// Fixed-width UTC timestamps so range filters can compare text directly.
fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl SqliteStore {
    /// Create a new `SQLite` store at the given path.
    ///
    /// Expands `~`, creates parent directories, opens connection,
    /// sets WAL mode and pragmas, and initializes schema.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::WriteFailed` if the database cannot be opened or initialized.
    pub fn new(path: &str) -> Result<Self, StoreError> {
        let expanded = shellexpand::tilde(path);
        let db_path = PathBuf::from(expanded.as_ref());

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        }

        let conn =
            Connection::open(&db_path).map_err(|e| StoreError::WriteFailed(e.to_string()))?;

        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        conn.pragma_update(None, "synchronous", "NORMAL")
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        conn.pragma_update(None, "foreign_keys", "ON")
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        conn.pragma_update(None, "busy_timeout", 5000)
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;

        migrations::initialize_schema(&conn).map_err(|e| StoreError::WriteFailed(e.to_string()))?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

type AlertRow = (String, String, String, String, String, String, String);

fn read_alert_row(row: &rusqlite::Row<'_>) -> Result<AlertRow, rusqlite::Error> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
    ))
}

fn parse_alert_row(row: AlertRow) -> Result<ProactiveAlert, StoreError> {
    let (created_at, alert_type, kind, severity, area, message, source) = row;

    let created_at = DateTime::parse_from_rfc3339(&created_at)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::InvalidRecord(e.to_string()))?;
    let kind: AlertKind = kind.parse().map_err(StoreError::InvalidRecord)?;
    let severity: Severity = severity.parse().map_err(StoreError::InvalidRecord)?;

    Ok(ProactiveAlert {
        alert_type,
        kind,
        message,
        severity,
        area,
        source,
        created_at,
    })
}

impl ReportSource for SqliteStore {
    fn symptom_tallies(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<SymptomTally>, StoreError> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::ReadFailed("lock poisoned".into()))?;

        let mut stmt = conn
            .prepare(
                "SELECT r.location_key, \
                        (SELECT f.location FROM reports f \
                         WHERE f.location_key = r.location_key \
                           AND f.reported_at >= ?1 AND f.reported_at < ?2 \
                         ORDER BY f.reported_at, f.id LIMIT 1), \
                        s.symptom, COUNT(*) \
                 FROM reports r JOIN report_symptoms s ON s.report_id = r.id \
                 WHERE r.reported_at >= ?1 AND r.reported_at < ?2 \
                 GROUP BY r.location_key, s.symptom \
                 ORDER BY r.location_key, s.symptom",
            )
            .map_err(|e| StoreError::ReadFailed(e.to_string()))?;

        let rows = stmt
            .query_map(params![timestamp(start), timestamp(end)], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, i64>(3)?,
                ))
            })
            .map_err(|e| StoreError::ReadFailed(e.to_string()))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| StoreError::ReadFailed(e.to_string()))?;

        drop(stmt);
        drop(conn);

        rows.into_iter()
            .map(|(key, display, symptom, count)| {
                Ok(SymptomTally {
                    location: Location::from_parts(key, display),
                    symptom: symptom.parse::<Symptom>().map_err(StoreError::InvalidRecord)?,
                    count: u32::try_from(count)
                        .map_err(|e| StoreError::InvalidRecord(e.to_string()))?,
                })
            })
            .collect()
    }
}

impl ReportStore for SqliteStore {
    fn save_report(&self, report: &SymptomReport) -> Result<(), StoreError> {
        let mut conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::WriteFailed("lock poisoned".into()))?;

        let tx = conn
            .transaction()
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;

        tx.execute(
            "INSERT INTO reports (location_key, location, reported_at) VALUES (?1, ?2, ?3)",
            params![
                report.location.key(),
                report.location.as_str(),
                timestamp(report.reported_at),
            ],
        )
        .map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        let report_id = tx.last_insert_rowid();

        for symptom in &report.symptoms {
            tx.execute(
                "INSERT INTO report_symptoms (report_id, symptom) VALUES (?1, ?2)",
                params![report_id, symptom.as_str()],
            )
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        }

        tx.commit()
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        drop(conn);
        Ok(())
    }

    fn purge_reports_before(&self, cutoff: DateTime<Utc>) -> Result<usize, StoreError> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::WriteFailed("lock poisoned".into()))?;

        let removed = conn
            .execute(
                "DELETE FROM reports WHERE reported_at < ?1",
                params![timestamp(cutoff)],
            )
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;

        drop(conn);
        Ok(removed)
    }
}

impl AlertSink for SqliteStore {
    fn save_alert(&self, alert: &ProactiveAlert) -> Result<(), StoreError> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::WriteFailed("lock poisoned".into()))?;

        conn.execute(
            "INSERT INTO alerts (created_at, type, kind, severity, area, message, source) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                timestamp(alert.created_at),
                alert.alert_type,
                alert.kind.as_str(),
                alert.severity.to_string(),
                alert.area,
                alert.message,
                alert.source,
            ],
        )
        .map_err(|e| StoreError::WriteFailed(e.to_string()))?;

        drop(conn);
        Ok(())
    }

    fn get_recent_alerts(&self, count: usize) -> Result<Vec<ProactiveAlert>, StoreError> {
        let limit = i64::try_from(count).map_err(|e| StoreError::ReadFailed(e.to_string()))?;

        let conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::ReadFailed("lock poisoned".into()))?;

        let mut stmt = conn
            .prepare(
                "SELECT created_at, type, kind, severity, area, message, source \
                 FROM alerts ORDER BY id DESC LIMIT ?1",
            )
            .map_err(|e| StoreError::ReadFailed(e.to_string()))?;

        let rows = stmt
            .query_map(params![limit], read_alert_row)
            .map_err(|e| StoreError::ReadFailed(e.to_string()))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| StoreError::ReadFailed(e.to_string()))?;

        drop(stmt);
        drop(conn);
        rows.into_iter().map(parse_alert_row).collect()
    }
}
