use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::value_objects::location::Location;
use crate::domain::value_objects::symptom::Symptom;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ReportError {
    #[error("location must not be blank")]
    BlankLocation,
    #[error("a report needs at least one symptom")]
    NoSymptoms,
    #[error("{0}")]
    UnknownSymptom(String),
}

/// A citizen symptom report. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomReport {
    pub location: Location,
    pub symptoms: BTreeSet<Symptom>,
    pub reported_at: DateTime<Utc>,
}

impl SymptomReport {
    /// Builds a report from raw citizen input.
    ///
    /// # Errors
    ///
    /// Returns `ReportError` if the location is blank, a symptom tag is
    /// unknown, or no symptom is given.
    pub fn new<S: AsRef<str>>(
        location: &str,
        symptoms: &[S],
        reported_at: DateTime<Utc>,
    ) -> Result<Self, ReportError> {
        let location = Location::parse(location).ok_or(ReportError::BlankLocation)?;
        let symptoms = symptoms
            .iter()
            .map(|s| s.as_ref().parse::<Symptom>())
            .collect::<Result<BTreeSet<_>, _>>()
            .map_err(ReportError::UnknownSymptom)?;
        if symptoms.is_empty() {
            return Err(ReportError::NoSymptoms);
        }
        Ok(Self {
            location,
            symptoms,
            reported_at,
        })
    }
}
