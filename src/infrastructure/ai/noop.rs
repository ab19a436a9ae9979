use async_trait::async_trait;

use crate::domain::entities::cluster::{ClusterAnalysis, ClusterNarrative};
use crate::domain::ports::enricher::{ClusterEnricher, EnrichmentError};

/// Enricher that never produces a narrative.
///
/// Used when AI is disabled or the configured provider is unknown.
pub struct NoopEnricher;

impl NoopEnricher {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for NoopEnricher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ClusterEnricher for NoopEnricher {
    async fn narrate(
        &self,
        _analysis: &ClusterAnalysis,
    ) -> Result<Option<ClusterNarrative>, EnrichmentError> {
        Ok(None)
    }
}
