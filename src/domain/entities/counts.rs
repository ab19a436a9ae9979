use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::location::Location;
use crate::domain::value_objects::symptom::Symptom;

/// Per-symptom occurrence counts for one location within a detection window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymptomCounts(BTreeMap<Symptom, u32>);

impl SymptomCounts {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `count` occurrences of `symptom`.
    pub fn add(&mut self, symptom: Symptom, count: u32) {
        let entry = self.0.entry(symptom).or_insert(0);
        *entry = entry.saturating_add(count);
    }

    /// Count for a symptom; absent symptoms count as zero.
    #[must_use]
    pub fn get(&self, symptom: Symptom) -> u32 {
        self.0.get(&symptom).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn sum_of(&self, symptoms: &[Symptom]) -> u32 {
        symptoms
            .iter()
            .fold(0u32, |acc, s| acc.saturating_add(self.get(*s)))
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.0.values().fold(0u32, |acc, c| acc.saturating_add(*c))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Symptom, u32)> + '_ {
        self.0.iter().map(|(s, c)| (*s, *c))
    }
}

impl FromIterator<(Symptom, u32)> for SymptomCounts {
    fn from_iter<I: IntoIterator<Item = (Symptom, u32)>>(iter: I) -> Self {
        let mut counts = Self::new();
        for (symptom, count) in iter {
            counts.add(symptom, count);
        }
        counts
    }
}

/// One row of the report store's grouped aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymptomTally {
    pub location: Location,
    pub symptom: Symptom,
    pub count: u32,
}

/// Grouped counts regrouped per location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationAggregate {
    pub location: Location,
    pub counts: SymptomCounts,
    pub total_reports: u32,
}
