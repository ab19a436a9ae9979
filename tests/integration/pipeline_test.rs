use std::time::Duration;

use chrono::{TimeDelta, Utc};

use epiwatch::application::config::AppConfig;
use epiwatch::application::services::alert_gate::AdmitAll;
use epiwatch::application::services::cluster_detector::ClusterDetector;
use epiwatch::application::services::dashboard::DashboardView;
use epiwatch::application::services::monitor::{OutbreakMonitor, DEFAULT_RETENTION_HOURS};
use epiwatch::application::services::proactive::{ProactiveContext, ProactiveEvaluator};
use epiwatch::domain::entities::alert::AlertKind;
use epiwatch::domain::entities::report::SymptomReport;
use epiwatch::domain::entities::weather::WeatherContext;
use epiwatch::domain::ports::store::{AlertSink, ReportStore};
use epiwatch::domain::rules::RuleSet;
use epiwatch::domain::value_objects::thresholds::EscalationThresholds;
use epiwatch::infrastructure::ai::noop::NoopEnricher;
use epiwatch::infrastructure::persistence::sqlite_store::SqliteStore;

use crate::common::{seed_fixture, TrackingNotifier};

#[tokio::test]
async fn sqlite_cycle_detects_escalates_and_persists() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("epiwatch.db");
    let store = SqliteStore::new(path.to_str().expect("path")).expect("store");
    seed_fixture(&store, "outbreak_surge.json", Utc::now());

    let notifier = TrackingNotifier::new();
    let detector = ClusterDetector::new(&store, RuleSet::default(), 12);
    let evaluator =
        ProactiveEvaluator::new(EscalationThresholds::default(), &store, &notifier, &AdmitAll);
    let monitor = OutbreakMonitor::new(
        &detector,
        &evaluator,
        &NoopEnricher,
        &store,
        false,
        Duration::from_secs(5),
        DEFAULT_RETENTION_HOURS,
    );

    let weather = WeatherContext {
        area: "Kolkata".to_string(),
        rainfall_mm: 10.0,
        humidity_percent: 90.0,
        temperature_c: 31.0,
    };
    let result = monitor.run_once(Some(weather)).await;

    assert_eq!(result.clusters_count(), 1);
    let kinds: Vec<AlertKind> = result.alerts.iter().map(|d| d.alert.kind).collect();
    assert_eq!(kinds, vec![AlertKind::VectorBorne, AlertKind::OutbreakEscalation]);
    assert_eq!(notifier.collected().len(), 2);

    let stored = store.get_recent_alerts(10).expect("alerts");
    assert_eq!(stored.len(), 2);
    assert!(stored.iter().any(|a| a.kind == AlertKind::OutbreakEscalation));

    let json = serde_json::to_value(&result.view).expect("serialize");
    assert_eq!(json["status"], "clusters_detected");
    assert_eq!(json["clusters"][0]["area"], "Kolkata");
    assert_eq!(json["clusters"][0]["totalReports"], 72);
}

#[tokio::test]
async fn quiet_store_reports_no_clusters() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("epiwatch.db");
    let store = SqliteStore::new(path.to_str().expect("path")).expect("store");
    let report = SymptomReport::new("Bhopal", &["rash"], Utc::now() - TimeDelta::hours(1))
        .expect("report");
    store.save_report(&report).expect("save");

    let notifier = TrackingNotifier::new();
    let detector = ClusterDetector::new(&store, RuleSet::default(), 12);
    let evaluator =
        ProactiveEvaluator::new(EscalationThresholds::default(), &store, &notifier, &AdmitAll);
    let monitor = OutbreakMonitor::new(
        &detector,
        &evaluator,
        &NoopEnricher,
        &store,
        false,
        Duration::from_secs(5),
        DEFAULT_RETENTION_HOURS,
    );

    let result = monitor.run_once(None).await;
    assert!(matches!(result.view, DashboardView::NoClusters { .. }));
    assert!(result.alerts.is_empty());
}

#[test]
fn configured_rules_and_thresholds_drive_detection() {
    let config: AppConfig = toml::from_str(
        r#"
        [detection]
        window_hours = 6

        [[detection.rules]]
        id = "rash"
        label = "Measles"
        symptoms = ["rash"]
        min_count = 3
        base_confidence = 0.6
        scale = 10.0
        actions = ["Check vaccination coverage"]

        [escalation]
        outbreak_min_confidence = 0.6
        outbreak_min_reports = 3
        "#,
    )
    .expect("parse config");

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("epiwatch.db");
    let store = SqliteStore::new(path.to_str().expect("path")).expect("store");
    let now = Utc::now();
    for hours_ago in [1, 2, 3, 9] {
        let report = SymptomReport::new("Bhopal", &["rash"], now - TimeDelta::hours(hours_ago))
            .expect("report");
        store.save_report(&report).expect("save");
    }

    let rules = config.rule_set().expect("rule set");
    let detector = ClusterDetector::new(&store, rules, config.detection.window_hours);
    let analysis = detector.detect_at(now).expect("detect");
    assert_eq!(analysis.clusters_detected, 1);
    assert_eq!(analysis.clusters[0].predicted_disease_type, "Measles");
    assert_eq!(analysis.clusters[0].total_reports, 3);
    assert!((analysis.clusters[0].confidence - 0.6).abs() < 1e-9);

    let notifier = TrackingNotifier::new();
    let thresholds = EscalationThresholds::from(&config.escalation);
    let evaluator = ProactiveEvaluator::new(thresholds, &store, &notifier, &AdmitAll);
    let context = ProactiveContext::default()
        .with_clusters(analysis.clusters);
    assert_eq!(evaluator.check_proactive_alerts(&context).len(), 1);
}

#[test]
fn purge_keeps_reports_inside_retention() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("epiwatch.db");
    let store = SqliteStore::new(path.to_str().expect("path")).expect("store");
    let now = Utc::now();
    for days_ago in [1, 6, 8, 10] {
        let report = SymptomReport::new("Indore", &["fever"], now - TimeDelta::days(days_ago))
            .expect("report");
        store.save_report(&report).expect("save");
    }

    let cutoff = now - TimeDelta::hours(i64::from(DEFAULT_RETENTION_HOURS));
    assert_eq!(store.purge_reports_before(cutoff).expect("purge"), 2);
    assert_eq!(store.purge_reports_before(cutoff).expect("purge"), 0);
}
