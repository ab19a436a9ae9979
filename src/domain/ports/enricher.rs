use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::cluster::{ClusterAnalysis, ClusterNarrative};

#[derive(Error, Debug)]
pub enum EnrichmentError {
    #[error("AI service unavailable: {0}")]
    ServiceUnavailable(String),
    #[error("invalid response from AI: {0}")]
    InvalidResponse(String),
    #[error("rate limited")]
    RateLimited,
    #[error("enrichment timed out")]
    Timeout,
}

#[async_trait]
pub trait ClusterEnricher: Send + Sync {
    /// Produce a narrative over a detection result. Must not alter it.
    ///
    /// `Ok(None)` means the provider chose not to answer (disabled, cooldown).
    ///
    /// # Errors
    ///
    /// Returns `EnrichmentError` if the AI service is unavailable,
    /// the response is invalid, the request is rate-limited, or
    /// the call times out.
    async fn narrate(
        &self,
        analysis: &ClusterAnalysis,
    ) -> Result<Option<ClusterNarrative>, EnrichmentError>;
}
