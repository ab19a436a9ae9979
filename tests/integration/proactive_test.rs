use std::time::Duration;

use epiwatch::application::services::alert_gate::{AdmitAll, RecentAlertGate};
use epiwatch::application::services::proactive::{ProactiveContext, ProactiveEvaluator};
use epiwatch::domain::entities::alert::AlertKind;
use epiwatch::domain::entities::cluster::ClusterResult;
use epiwatch::domain::entities::weather::WeatherContext;
use epiwatch::domain::ports::store::AlertSink;
use epiwatch::domain::value_objects::location::Location;
use epiwatch::domain::value_objects::severity::Severity;
use epiwatch::domain::value_objects::symptom::Symptom;
use epiwatch::domain::value_objects::thresholds::EscalationThresholds;
use epiwatch::infrastructure::persistence::in_memory_store::InMemoryStore;

use crate::common::{DeadChannel, TrackingNotifier};

fn weather(area: &str, rainfall: f64, humidity: f64, temperature: f64) -> WeatherContext {
    WeatherContext {
        area: area.to_string(),
        rainfall_mm: rainfall,
        humidity_percent: humidity,
        temperature_c: temperature,
    }
}

fn cluster(area: &str, confidence: f64, total_reports: u32) -> ClusterResult {
    ClusterResult {
        area: Location::parse(area).expect("location"),
        predicted_disease_type: "Viral Fever".to_string(),
        detection_rule: "viral".to_string(),
        symptom_counts: [(Symptom::Fever, total_reports)].into_iter().collect(),
        total_reports,
        confidence,
        recommended_actions: vec!["Deploy mobile fever clinics to the area".to_string()],
    }
}

#[test]
fn scenario_c_monsoon_day_raises_two_alerts() {
    let store = InMemoryStore::new();
    let notifier = TrackingNotifier::new();
    let evaluator =
        ProactiveEvaluator::new(EscalationThresholds::default(), &store, &notifier, &AdmitAll);

    let context = ProactiveContext::default().with_weather(weather("Kochi", 60.0, 70.0, 30.0));
    let dispatched = evaluator.check_proactive_alerts(&context);

    let summary: Vec<(AlertKind, Severity)> = dispatched
        .iter()
        .map(|d| (d.alert.kind, d.alert.severity))
        .collect();
    assert_eq!(
        summary,
        vec![
            (AlertKind::VectorBorne, Severity::Medium),
            (AlertKind::PostFlood, Severity::High),
        ]
    );
    assert!(dispatched.iter().all(|d| d.persisted && d.broadcast));
    assert_eq!(notifier.collected().len(), 2);
    assert_eq!(store.get_recent_alerts(10).expect("alerts").len(), 2);
}

#[test]
fn scenario_d_confident_cluster_escalates_once() {
    let store = InMemoryStore::new();
    let notifier = TrackingNotifier::new();
    let evaluator =
        ProactiveEvaluator::new(EscalationThresholds::default(), &store, &notifier, &AdmitAll);

    let context = ProactiveContext::default().with_clusters(vec![cluster("Surat", 0.72, 6)]);
    let dispatched = evaluator.check_proactive_alerts(&context);

    assert_eq!(dispatched.len(), 1);
    let alert = &dispatched[0].alert;
    assert_eq!(alert.kind, AlertKind::OutbreakEscalation);
    assert_eq!(alert.severity, Severity::Critical);
    assert_eq!(alert.area, "Surat");
    assert_eq!(alert.alert_type, "proactive");
    assert_eq!(alert.source, "proactive-engine");
}

#[test]
fn weak_clusters_do_not_escalate() {
    let store = InMemoryStore::new();
    let notifier = TrackingNotifier::new();
    let evaluator =
        ProactiveEvaluator::new(EscalationThresholds::default(), &store, &notifier, &AdmitAll);

    let context = ProactiveContext::default().with_clusters(vec![
        cluster("Surat", 0.69, 40),
        cluster("Nagpur", 0.9, 4),
    ]);
    assert!(evaluator.check_proactive_alerts(&context).is_empty());
    assert!(notifier.collected().is_empty());
}

#[test]
fn empty_context_is_a_no_op() {
    let store = InMemoryStore::new();
    let notifier = TrackingNotifier::new();
    let evaluator =
        ProactiveEvaluator::new(EscalationThresholds::default(), &store, &notifier, &AdmitAll);

    assert!(evaluator
        .check_proactive_alerts(&ProactiveContext::default())
        .is_empty());
    assert!(store.get_recent_alerts(10).expect("alerts").is_empty());
}

#[test]
fn failed_broadcast_still_persists() {
    let store = InMemoryStore::new();
    let evaluator =
        ProactiveEvaluator::new(EscalationThresholds::default(), &store, &DeadChannel, &AdmitAll);

    let context = ProactiveContext::default().with_weather(weather("Guwahati", 75.0, 50.0, 20.0));
    let dispatched = evaluator.check_proactive_alerts(&context);

    assert_eq!(dispatched.len(), 1);
    assert!(dispatched[0].persisted);
    assert!(!dispatched[0].broadcast);
    let stored = store.get_recent_alerts(10).expect("alerts");
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].kind, AlertKind::PostFlood);
}

#[test]
fn repeated_conditions_reemit_without_a_gate() {
    let store = InMemoryStore::new();
    let notifier = TrackingNotifier::new();
    let evaluator =
        ProactiveEvaluator::new(EscalationThresholds::default(), &store, &notifier, &AdmitAll);
    let context = ProactiveContext::default().with_weather(weather("Kochi", 60.0, 70.0, 30.0));

    evaluator.check_proactive_alerts(&context);
    evaluator.check_proactive_alerts(&context);
    assert_eq!(notifier.collected().len(), 4);
}

#[test]
fn dedup_gate_suppresses_repeats() {
    let store = InMemoryStore::new();
    let notifier = TrackingNotifier::new();
    let gate = RecentAlertGate::new(Duration::from_secs(3600));
    let evaluator =
        ProactiveEvaluator::new(EscalationThresholds::default(), &store, &notifier, &gate);
    let context = ProactiveContext::default().with_weather(weather("Kochi", 60.0, 70.0, 30.0));

    assert_eq!(evaluator.check_proactive_alerts(&context).len(), 2);
    assert!(evaluator.check_proactive_alerts(&context).is_empty());
    assert_eq!(store.get_recent_alerts(10).expect("alerts").len(), 2);
}
