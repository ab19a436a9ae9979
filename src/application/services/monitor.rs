use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

use super::cluster_detector::ClusterDetector;
use super::dashboard::DashboardView;
use super::enrichment::{enrich_analysis, EnrichedAnalysis};
use super::proactive::{DispatchedAlert, ProactiveContext, ProactiveEvaluator};
use crate::domain::entities::weather::WeatherContext;
use crate::domain::ports::enricher::ClusterEnricher;
use crate::domain::ports::store::{ReportStore, StoreError};

pub const DEFAULT_RETENTION_HOURS: u32 = 7 * 24;

/// Result of a single monitoring cycle.
pub struct MonitorCycleResult {
    pub view: DashboardView,
    pub alerts: Vec<DispatchedAlert>,
}

impl MonitorCycleResult {
    #[must_use]
    pub fn clusters_count(&self) -> usize {
        self.view.clusters().len()
    }
}

/// Orchestrates a cycle: detect → enrich → dashboard view → escalate.
pub struct OutbreakMonitor<'a> {
    detector: &'a ClusterDetector<'a>,
    evaluator: &'a ProactiveEvaluator<'a>,
    enricher: &'a dyn ClusterEnricher,
    report_store: &'a dyn ReportStore,
    ai_enabled: bool,
    ai_timeout: Duration,
    retention_hours: u32,
}

impl<'a> OutbreakMonitor<'a> {
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        detector: &'a ClusterDetector<'a>,
        evaluator: &'a ProactiveEvaluator<'a>,
        enricher: &'a dyn ClusterEnricher,
        report_store: &'a dyn ReportStore,
        ai_enabled: bool,
        ai_timeout: Duration,
        retention_hours: u32,
    ) -> Self {
        Self {
            detector,
            evaluator,
            enricher,
            report_store,
            ai_enabled,
            ai_timeout,
            retention_hours,
        }
    }

    /// Run one cycle at the current time.
    ///
    /// A detection failure is reported through the view and skips cluster
    /// escalation; weather alerts are still evaluated.
    pub async fn run_once(&self, weather: Option<WeatherContext>) -> MonitorCycleResult {
        let mut context = ProactiveContext {
            weather,
            clusters: None,
        };

        let view = match self.detector.detect() {
            Ok(analysis) => {
                context.clusters = Some(analysis.clusters.clone());
                let enriched = if self.ai_enabled {
                    enrich_analysis(self.enricher, analysis, self.ai_timeout).await
                } else {
                    EnrichedAnalysis {
                        analysis,
                        narrative: None,
                    }
                };
                DashboardView::from_enriched(enriched)
            }
            Err(e) => {
                tracing::error!("Cluster detection failed: {e}");
                DashboardView::failed(&e)
            }
        };

        let alerts = self.evaluator.check_proactive_alerts(&context);

        MonitorCycleResult { view, alerts }
    }

    /// Delete reports older than the retention window.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the deletion fails.
    pub fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, StoreError> {
        let cutoff = now - TimeDelta::hours(i64::from(self.retention_hours));
        let removed = self.report_store.purge_reports_before(cutoff)?;
        if removed > 0 {
            tracing::info!("Purged {removed} expired report(s)");
        }
        Ok(removed)
    }
}
