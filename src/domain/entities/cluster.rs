use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::counts::SymptomCounts;
use crate::domain::value_objects::location::Location;

/// One outbreak candidate: a location where a detection rule matched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterResult {
    pub area: Location,
    pub predicted_disease_type: String,
    pub detection_rule: String,
    pub symptom_counts: SymptomCounts,
    pub total_reports: u32,
    pub confidence: f64,
    #[serde(rename = "recommendedAuthorityAction")]
    pub recommended_actions: Vec<String>,
}

/// Output of a detection run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterAnalysis {
    pub analysed_at: DateTime<Utc>,
    pub window_hours: u32,
    pub clusters_detected: usize,
    pub clusters: Vec<ClusterResult>,
}

impl ClusterAnalysis {
    #[must_use]
    pub fn new(analysed_at: DateTime<Utc>, window_hours: u32, clusters: Vec<ClusterResult>) -> Self {
        Self {
            analysed_at,
            window_hours,
            clusters_detected: clusters.len(),
            clusters,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }
}

/// Free-text narrative produced by the optional AI enrichment stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterNarrative {
    pub generated_at: DateTime<Utc>,
    pub summary: String,
    pub details: String,
}
