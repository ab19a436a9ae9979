use std::time::Duration;

use chrono::Utc;

use crate::application::services::monitor::OutbreakMonitor;

/// Run the outbreak monitor at a fixed interval until Ctrl+C.
///
/// Each tick runs one detection and escalation cycle, then purges reports
/// past retention. Failures inside a cycle are logged and never stop the
/// loop.
///
/// # Errors
///
/// Returns an error if `interval_secs` is zero.
pub async fn run_daemon(monitor: &OutbreakMonitor<'_>, interval_secs: u64) -> anyhow::Result<()> {
    if interval_secs == 0 {
        anyhow::bail!("Daemon interval must be greater than 0");
    }
    tracing::info!("Daemon started (interval: {interval_secs}s)");
    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let result = monitor.run_once(None).await;
                if result.view.is_failure() {
                    tracing::error!("Cycle finished without detection");
                } else {
                    tracing::info!(
                        "Cycle finished: {} cluster(s), {} alert(s)",
                        result.clusters_count(),
                        result.alerts.len()
                    );
                }
                if let Err(e) = monitor.purge_expired(Utc::now()) {
                    tracing::warn!("Retention purge failed: {e}");
                }
            }
            _ = &mut shutdown => {
                tracing::info!("Shutdown signal received, stopping");
                println!("\nStopping epiwatch...");
                break;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use crate::application::services::alert_gate::AdmitAll;
    use crate::application::services::cluster_detector::ClusterDetector;
    use crate::application::services::monitor::DEFAULT_RETENTION_HOURS;
    use crate::application::services::proactive::ProactiveEvaluator;
    use crate::domain::entities::alert::ProactiveAlert;
    use crate::domain::entities::counts::SymptomTally;
    use crate::domain::ports::notifier::{NotificationError, Notifier};
    use crate::domain::ports::store::{ReportSource, StoreError};
    use crate::domain::rules::RuleSet;
    use crate::domain::value_objects::thresholds::EscalationThresholds;
    use crate::infrastructure::ai::noop::NoopEnricher;
    use crate::infrastructure::persistence::in_memory_store::InMemoryStore;
    use chrono::DateTime;

    struct MockNotifier;

    impl Notifier for MockNotifier {
        fn notify(&self, _alert: &ProactiveAlert) -> Result<(), NotificationError> {
            Ok(())
        }
    }

    struct FailingSource;

    impl ReportSource for FailingSource {
        fn symptom_tallies(
            &self,
            _start: DateTime<Utc>,
            _end: DateTime<Utc>,
        ) -> Result<Vec<SymptomTally>, StoreError> {
            Err(StoreError::ReadFailed("test failure".into()))
        }
    }

    #[tokio::test]
    async fn daemon_survives_failing_cycles() {
        let store = InMemoryStore::new();
        let detector = ClusterDetector::new(&FailingSource, RuleSet::default(), 12);
        let evaluator = ProactiveEvaluator::new(
            EscalationThresholds::default(),
            &store,
            &MockNotifier,
            &AdmitAll,
        );
        let monitor = OutbreakMonitor::new(
            &detector,
            &evaluator,
            &NoopEnricher,
            &store,
            false,
            Duration::from_secs(1),
            DEFAULT_RETENTION_HOURS,
        );

        let result =
            tokio::time::timeout(Duration::from_millis(200), run_daemon(&monitor, 1)).await;

        // Timeout expected: the daemon keeps looping until ctrl_c
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn zero_interval_is_rejected() {
        let store = InMemoryStore::new();
        let detector = ClusterDetector::new(&store, RuleSet::default(), 12);
        let evaluator = ProactiveEvaluator::new(
            EscalationThresholds::default(),
            &store,
            &MockNotifier,
            &AdmitAll,
        );
        let monitor = OutbreakMonitor::new(
            &detector,
            &evaluator,
            &NoopEnricher,
            &store,
            false,
            Duration::from_secs(1),
            DEFAULT_RETENTION_HOURS,
        );
        assert!(run_daemon(&monitor, 0).await.is_err());
    }
}
