use std::collections::BTreeMap;

use chrono::{DateTime, TimeDelta, Utc};
use thiserror::Error;

use crate::domain::entities::cluster::{ClusterAnalysis, ClusterResult};
use crate::domain::entities::counts::{LocationAggregate, SymptomCounts, SymptomTally};
use crate::domain::ports::store::{ReportSource, StoreError};
use crate::domain::rules::RuleSet;
use crate::domain::value_objects::location::Location;

pub const DEFAULT_WINDOW_HOURS: u32 = 12;

#[derive(Error, Debug)]
pub enum DetectionError {
    #[error("report store unavailable: {0}")]
    DataSourceUnavailable(#[source] StoreError),
}

impl DetectionError {
    /// Whether the caller may retry the run later.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::DataSourceUnavailable(_) => true,
        }
    }
}

/// Regroups `(location, symptom) -> count` tallies per location.
///
/// Output is sorted by location key. `total_reports` is the sum of the
/// location's tallies.
#[must_use]
pub fn aggregate(tallies: Vec<SymptomTally>) -> Vec<LocationAggregate> {
    let mut by_location: BTreeMap<Location, SymptomCounts> = BTreeMap::new();
    for tally in tallies {
        if tally.count == 0 {
            continue;
        }
        by_location
            .entry(tally.location)
            .or_default()
            .add(tally.symptom, tally.count);
    }
    by_location
        .into_iter()
        .map(|(location, counts)| LocationAggregate {
            total_reports: counts.total(),
            location,
            counts,
        })
        .collect()
}

/// Aggregates recent symptom reports and scores them against a rule set.
pub struct ClusterDetector<'a> {
    source: &'a dyn ReportSource,
    rules: RuleSet,
    window_hours: u32,
}

impl<'a> ClusterDetector<'a> {
    #[must_use]
    pub fn new(source: &'a dyn ReportSource, rules: RuleSet, window_hours: u32) -> Self {
        Self {
            source,
            rules,
            window_hours: window_hours.max(1),
        }
    }

    #[must_use]
    pub const fn window_hours(&self) -> u32 {
        self.window_hours
    }

    #[must_use]
    pub const fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Run detection over the window ending now.
    ///
    /// # Errors
    ///
    /// Returns `DetectionError::DataSourceUnavailable` if the report store
    /// aggregation fails.
    pub fn detect(&self) -> Result<ClusterAnalysis, DetectionError> {
        self.detect_at(Utc::now())
    }

    /// Run detection over `[now - window, now)`.
    ///
    /// # Errors
    ///
    /// Returns `DetectionError::DataSourceUnavailable` if the report store
    /// aggregation fails. No partial result is produced.
    pub fn detect_at(&self, now: DateTime<Utc>) -> Result<ClusterAnalysis, DetectionError> {
        let start = now - TimeDelta::hours(i64::from(self.window_hours));
        let tallies = self
            .source
            .symptom_tallies(start, now)
            .map_err(DetectionError::DataSourceUnavailable)?;

        let aggregates = aggregate(tallies);
        let mut clusters = Vec::new();
        for aggregate in &aggregates {
            for matched in self.rules.evaluate(&aggregate.counts) {
                tracing::debug!(
                    area = %aggregate.location,
                    rule = %matched.rule.id,
                    confidence = matched.confidence,
                    "cluster rule matched"
                );
                clusters.push(ClusterResult {
                    area: aggregate.location.clone(),
                    predicted_disease_type: matched.rule.label.clone(),
                    detection_rule: matched.rule.id.clone(),
                    symptom_counts: aggregate.counts.clone(),
                    total_reports: aggregate.total_reports,
                    confidence: matched.confidence,
                    recommended_actions: matched.rule.actions.clone(),
                });
            }
        }

        tracing::info!(
            locations = aggregates.len(),
            clusters = clusters.len(),
            window_hours = self.window_hours,
            "cluster detection complete"
        );

        Ok(ClusterAnalysis::new(now, self.window_hours, clusters))
    }
}
