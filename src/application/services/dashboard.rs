use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::application::services::cluster_detector::DetectionError;
use crate::application::services::enrichment::EnrichedAnalysis;
use crate::domain::entities::cluster::{ClusterAnalysis, ClusterNarrative, ClusterResult};

/// Admin dashboard response for a detection run.
///
/// "No clusters" and "detection failed" are separate states so the
/// dashboard never shows a failed run as a quiet one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DashboardView {
    ClustersDetected {
        #[serde(rename = "analysedAt")]
        analysed_at: DateTime<Utc>,
        #[serde(rename = "windowHours")]
        window_hours: u32,
        #[serde(rename = "clustersDetected")]
        clusters_detected: usize,
        clusters: Vec<ClusterResult>,
        #[serde(skip_serializing_if = "Option::is_none")]
        narrative: Option<ClusterNarrative>,
    },
    NoClusters {
        #[serde(rename = "analysedAt")]
        analysed_at: DateTime<Utc>,
        #[serde(rename = "windowHours")]
        window_hours: u32,
    },
    DetectionFailed {
        error: String,
        retryable: bool,
    },
}

impl DashboardView {
    #[must_use]
    pub fn from_detection(result: Result<ClusterAnalysis, DetectionError>) -> Self {
        match result {
            Ok(analysis) => Self::from_enriched(EnrichedAnalysis {
                analysis,
                narrative: None,
            }),
            Err(e) => Self::failed(&e),
        }
    }

    #[must_use]
    pub fn from_enriched(enriched: EnrichedAnalysis) -> Self {
        let EnrichedAnalysis {
            analysis,
            narrative,
        } = enriched;
        if analysis.is_empty() {
            Self::NoClusters {
                analysed_at: analysis.analysed_at,
                window_hours: analysis.window_hours,
            }
        } else {
            Self::ClustersDetected {
                analysed_at: analysis.analysed_at,
                window_hours: analysis.window_hours,
                clusters_detected: analysis.clusters_detected,
                clusters: analysis.clusters,
                narrative,
            }
        }
    }

    #[must_use]
    pub fn failed(error: &DetectionError) -> Self {
        Self::DetectionFailed {
            error: error.to_string(),
            retryable: error.is_retryable(),
        }
    }

    #[must_use]
    pub fn clusters(&self) -> &[ClusterResult] {
        match self {
            Self::ClustersDetected { clusters, .. } => clusters,
            Self::NoClusters { .. } | Self::DetectionFailed { .. } => &[],
        }
    }

    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::DetectionFailed { .. })
    }
}
