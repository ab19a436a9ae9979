use std::time::Duration;

use serde::Serialize;

use crate::domain::entities::cluster::{ClusterAnalysis, ClusterNarrative};
use crate::domain::ports::enricher::{ClusterEnricher, EnrichmentError};

/// A detection result with its optional AI narrative.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedAnalysis {
    #[serde(flatten)]
    pub analysis: ClusterAnalysis,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub narrative: Option<ClusterNarrative>,
}

/// Decorates a detection result with a narrative, best-effort.
///
/// The enricher call is bounded by `timeout`. Failures and timeouts are
/// logged and leave `narrative` empty; `analysis` is returned untouched.
pub async fn enrich_analysis(
    enricher: &dyn ClusterEnricher,
    analysis: ClusterAnalysis,
    timeout: Duration,
) -> EnrichedAnalysis {
    if analysis.is_empty() {
        return EnrichedAnalysis {
            analysis,
            narrative: None,
        };
    }

    let outcome = tokio::time::timeout(timeout, enricher.narrate(&analysis))
        .await
        .unwrap_or(Err(EnrichmentError::Timeout));

    let narrative = match outcome {
        Ok(narrative) => narrative,
        Err(e) => {
            tracing::warn!("Cluster enrichment unavailable: {e}");
            None
        }
    };

    EnrichedAnalysis {
        analysis,
        narrative,
    }
}
