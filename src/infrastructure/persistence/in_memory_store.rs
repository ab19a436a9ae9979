use std::collections::BTreeMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};

use crate::domain::entities::alert::ProactiveAlert;
use crate::domain::entities::counts::SymptomTally;
use crate::domain::entities::report::SymptomReport;
use crate::domain::ports::store::{AlertSink, ReportSource, ReportStore, StoreError};
use crate::domain::value_objects::location::Location;

/// In-memory store for tests and dry runs.
pub struct InMemoryStore {
    reports: Mutex<Vec<SymptomReport>>,
    alerts: Mutex<Vec<ProactiveAlert>>,
}

impl InMemoryStore {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            reports: Mutex::new(Vec::new()),
            alerts: Mutex::new(Vec::new()),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportSource for InMemoryStore {
    fn symptom_tallies(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<SymptomTally>, StoreError> {
        let reports = self
            .reports
            .lock()
            .map_err(|_| StoreError::ReadFailed("lock poisoned".into()))?;

        // Display spelling is taken from the earliest report per location key
        let mut first_seen: BTreeMap<String, (DateTime<Utc>, Location)> = BTreeMap::new();
        let mut grouped = BTreeMap::new();
        for report in reports
            .iter()
            .filter(|r| r.reported_at >= start && r.reported_at < end)
        {
            let earliest = first_seen
                .entry(report.location.key().to_string())
                .or_insert_with(|| (report.reported_at, report.location.clone()));
            if report.reported_at < earliest.0 {
                *earliest = (report.reported_at, report.location.clone());
            }
            for symptom in &report.symptoms {
                let count: &mut u32 = grouped
                    .entry((report.location.key().to_string(), *symptom))
                    .or_insert(0);
                *count = count.saturating_add(1);
            }
        }
        drop(reports);

        Ok(grouped
            .into_iter()
            .filter_map(|((key, symptom), count)| {
                first_seen.get(&key).map(|(_, location)| SymptomTally {
                    location: location.clone(),
                    symptom,
                    count,
                })
            })
            .collect())
    }
}

impl ReportStore for InMemoryStore {
    fn save_report(&self, report: &SymptomReport) -> Result<(), StoreError> {
        self.reports
            .lock()
            .map_err(|_| StoreError::WriteFailed("lock poisoned".into()))?
            .push(report.clone());
        Ok(())
    }

    fn purge_reports_before(&self, cutoff: DateTime<Utc>) -> Result<usize, StoreError> {
        let mut reports = self
            .reports
            .lock()
            .map_err(|_| StoreError::WriteFailed("lock poisoned".into()))?;
        let before = reports.len();
        reports.retain(|r| r.reported_at >= cutoff);
        Ok(before - reports.len())
    }
}

impl AlertSink for InMemoryStore {
    fn save_alert(&self, alert: &ProactiveAlert) -> Result<(), StoreError> {
        self.alerts
            .lock()
            .map_err(|_| StoreError::WriteFailed("lock poisoned".into()))?
            .push(alert.clone());
        Ok(())
    }

    fn get_recent_alerts(&self, count: usize) -> Result<Vec<ProactiveAlert>, StoreError> {
        let mut alerts = self
            .alerts
            .lock()
            .map_err(|_| StoreError::ReadFailed("lock poisoned".into()))?
            .clone();
        alerts.reverse();
        alerts.truncate(count);
        Ok(alerts)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use crate::domain::entities::alert::AlertKind;
    use crate::domain::value_objects::severity::Severity;
    use crate::domain::value_objects::symptom::Symptom;
    use chrono::TimeDelta;

    fn report(location: &str, symptoms: &[&str], at: DateTime<Utc>) -> SymptomReport {
        SymptomReport::new(location, symptoms, at).expect("report")
    }

    #[test]
    fn new_store_is_empty() {
        let store = InMemoryStore::new();
        let now = Utc::now();
        assert!(store
            .symptom_tallies(now - TimeDelta::hours(12), now)
            .expect("tallies")
            .is_empty());
        assert!(store.get_recent_alerts(10).expect("alerts").is_empty());
    }

    #[test]
    fn tallies_group_by_location_and_symptom() {
        let store = InMemoryStore::new();
        let now = Utc::now();
        let at = now - TimeDelta::hours(1);
        store
            .save_report(&report("Mumbai", &["fever", "cough"], at))
            .expect("save");
        store
            .save_report(&report("  mumbai ", &["fever"], at))
            .expect("save");
        store.save_report(&report("Pune", &["rash"], at)).expect("save");

        let tallies = store
            .symptom_tallies(now - TimeDelta::hours(12), now)
            .expect("tallies");
        assert_eq!(tallies.len(), 3);

        let fever = tallies
            .iter()
            .find(|t| t.symptom == Symptom::Fever)
            .expect("fever tally");
        assert_eq!(fever.count, 2);
        assert_eq!(fever.location.as_str(), "Mumbai");
    }

    #[test]
    fn tallies_respect_half_open_window() {
        let store = InMemoryStore::new();
        let end = Utc::now();
        let start = end - TimeDelta::hours(12);
        store.save_report(&report("Delhi", &["fever"], start)).expect("save");
        store.save_report(&report("Delhi", &["fever"], end)).expect("save");
        store
            .save_report(&report("Delhi", &["fever"], start - TimeDelta::seconds(1)))
            .expect("save");

        let tallies = store.symptom_tallies(start, end).expect("tallies");
        assert_eq!(tallies.len(), 1);
        assert_eq!(tallies[0].count, 1);
    }

    #[test]
    fn purge_removes_only_older_reports() {
        let store = InMemoryStore::new();
        let now = Utc::now();
        store
            .save_report(&report("Agra", &["fever"], now - TimeDelta::days(10)))
            .expect("save");
        store.save_report(&report("Agra", &["fever"], now)).expect("save");

        let removed = store
            .purge_reports_before(now - TimeDelta::days(7))
            .expect("purge");
        assert_eq!(removed, 1);
        assert_eq!(
            store
                .symptom_tallies(now - TimeDelta::days(30), now + TimeDelta::seconds(1))
                .expect("tallies")[0]
                .count,
            1
        );
    }

    #[test]
    fn recent_alerts_newest_first_with_limit() {
        let store = InMemoryStore::new();
        for area in ["A", "B", "C"] {
            store
                .save_alert(&ProactiveAlert::new(
                    AlertKind::PostFlood,
                    Severity::High,
                    area,
                    "flood",
                ))
                .expect("save");
        }

        let recent = store.get_recent_alerts(2).expect("alerts");
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].area, "C");
        assert_eq!(recent[1].area, "B");
    }
}
