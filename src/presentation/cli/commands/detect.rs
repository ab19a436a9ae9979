use std::time::Duration;

use crate::application::services::cluster_detector::ClusterDetector;
use crate::application::services::dashboard::DashboardView;
use crate::application::services::enrichment::{enrich_analysis, EnrichedAnalysis};
use crate::domain::ports::enricher::ClusterEnricher;
use crate::presentation::cli::formatters::cluster_fmt::format_dashboard;

/// Runs one detection pass and prints the dashboard view.
///
/// With `ai`, the result is decorated with a narrative bounded by `ai_timeout`.
///
/// # Errors
///
/// Returns an error if detection failed (after printing the failure view)
/// or JSON serialization fails.
pub async fn run_detect(
    detector: &ClusterDetector<'_>,
    enricher: &dyn ClusterEnricher,
    ai_timeout: Duration,
    ai: bool,
    json: bool,
) -> anyhow::Result<DashboardView> {
    let view = match detector.detect() {
        Ok(analysis) if ai => {
            DashboardView::from_enriched(enrich_analysis(enricher, analysis, ai_timeout).await)
        }
        Ok(analysis) => DashboardView::from_enriched(EnrichedAnalysis {
            analysis,
            narrative: None,
        }),
        Err(e) => {
            tracing::error!("Cluster detection failed: {e}");
            DashboardView::failed(&e)
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        format_dashboard(&view);
    }

    if let DashboardView::DetectionFailed { error, .. } = &view {
        anyhow::bail!("Cluster detection failed: {error}");
    }
    Ok(view)
}
