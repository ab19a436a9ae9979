use chrono::{TimeDelta, Utc};

use epiwatch::application::services::cluster_detector::ClusterDetector;
use epiwatch::domain::entities::report::SymptomReport;
use epiwatch::domain::ports::store::ReportStore;
use epiwatch::domain::rules::RuleSet;
use epiwatch::domain::value_objects::symptom::Symptom;
use epiwatch::infrastructure::persistence::in_memory_store::InMemoryStore;
use epiwatch::infrastructure::persistence::sqlite_store::SqliteStore;

use crate::common::seed_fixture;

fn sqlite_store() -> (SqliteStore, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("epiwatch.db");
    let store = SqliteStore::new(path.to_str().expect("path")).expect("store");
    (store, dir)
}

#[test]
fn scenario_a_single_viral_cluster() {
    let store = InMemoryStore::new();
    let now = Utc::now();
    seed_fixture(&store, "scenario_a_viral.json", now);

    let detector = ClusterDetector::new(&store, RuleSet::default(), 12);
    let analysis = detector.detect_at(now).expect("detect");

    assert_eq!(analysis.clusters_detected, 1);
    let cluster = &analysis.clusters[0];
    assert_eq!(cluster.area.as_str(), "Mumbai");
    assert_eq!(cluster.detection_rule, "viral");
    assert_eq!(cluster.predicted_disease_type, "Viral Fever");
    assert_eq!(cluster.total_reports, 12);
    assert!((cluster.confidence - 0.55).abs() < 1e-9);
}

#[test]
fn scenario_b_waterborne_cluster_on_sqlite() {
    let (store, _dir) = sqlite_store();
    let now = Utc::now();
    seed_fixture(&store, "scenario_b_waterborne.json", now);

    let detector = ClusterDetector::new(&store, RuleSet::default(), 12);
    let analysis = detector.detect_at(now).expect("detect");

    assert_eq!(analysis.clusters_detected, 1);
    let cluster = &analysis.clusters[0];
    assert_eq!(cluster.detection_rule, "waterborne");
    assert_eq!(cluster.total_reports, 9);
    assert_eq!(cluster.symptom_counts.get(Symptom::Vomiting), 5);
    assert_eq!(cluster.symptom_counts.get(Symptom::Diarrhea), 4);
    assert!((cluster.confidence - 0.53).abs() < 1e-9);
}

#[test]
fn viral_boundary_is_inclusive() {
    let now = Utc::now();
    for (fever, expected) in [(9, 0), (10, 1)] {
        let store = InMemoryStore::new();
        for _ in 0..fever {
            let report = SymptomReport::new("Agra", &["fever"], now - TimeDelta::hours(1))
                .expect("report");
            store.save_report(&report).expect("save");
        }
        let detector = ClusterDetector::new(&store, RuleSet::default(), 12);
        let analysis = detector.detect_at(now).expect("detect");
        assert_eq!(analysis.clusters_detected, expected, "fever = {fever}");
    }
}

#[test]
fn mixed_city_matches_between_backends() {
    let now = Utc::now();
    let memory = InMemoryStore::new();
    let (sqlite, _dir) = sqlite_store();
    seed_fixture(&memory, "mixed_city.json", now);
    seed_fixture(&sqlite, "mixed_city.json", now);

    let from_memory = ClusterDetector::new(&memory, RuleSet::default(), 12)
        .detect_at(now)
        .expect("detect memory");
    let from_sqlite = ClusterDetector::new(&sqlite, RuleSet::default(), 12)
        .detect_at(now)
        .expect("detect sqlite");

    assert_eq!(from_memory.clusters, from_sqlite.clusters);

    // Delhi: fever 14 and cough 20 in window; the 30h-old batch is ignored.
    let rules: Vec<(&str, &str)> = from_sqlite
        .clusters
        .iter()
        .map(|c| (c.area.key(), c.detection_rule.as_str()))
        .collect();
    assert_eq!(
        rules,
        vec![
            ("delhi", "viral"),
            ("delhi", "respiratory"),
            ("pune", "waterborne"),
        ]
    );

    let delhi_viral = &from_sqlite.clusters[0];
    assert_eq!(delhi_viral.symptom_counts.get(Symptom::Fever), 14);
    assert_eq!(delhi_viral.symptom_counts.get(Symptom::Cough), 20);
    assert!((delhi_viral.confidence - 0.6).abs() < 1e-9);

    let delhi_respiratory = &from_sqlite.clusters[1];
    assert!((delhi_respiratory.confidence - 0.75).abs() < 1e-9);
}

#[test]
fn repeated_runs_are_identical() {
    let store = InMemoryStore::new();
    let now = Utc::now();
    seed_fixture(&store, "mixed_city.json", now);
    let detector = ClusterDetector::new(&store, RuleSet::default(), 12);

    let first = detector.detect_at(now).expect("first");
    let second = detector.detect_at(now).expect("second");
    assert_eq!(first.clusters, second.clusters);
}

#[test]
fn confidence_is_capped() {
    let store = InMemoryStore::new();
    let now = Utc::now();
    seed_fixture(&store, "outbreak_surge.json", now);

    let analysis = ClusterDetector::new(&store, RuleSet::default(), 12)
        .detect_at(now)
        .expect("detect");
    assert_eq!(analysis.clusters_detected, 1);
    assert!((analysis.clusters[0].confidence - 0.95).abs() < 1e-9);
}

#[test]
fn area_spelling_is_the_same_on_both_backends() {
    let now = Utc::now();
    let memory = InMemoryStore::new();
    let (sqlite, _dir) = sqlite_store();

    // Saved out of chronological order on purpose
    let batches = [("MUMBAI", 1), ("Mumbai", 4), ("mumbai", 2)];
    for store in [&memory as &dyn ReportStore, &sqlite] {
        for (spelling, hours_ago) in batches {
            for _ in 0..4 {
                let report =
                    SymptomReport::new(spelling, &["fever"], now - TimeDelta::hours(hours_ago))
                        .expect("report");
                store.save_report(&report).expect("save");
            }
        }
    }

    let from_memory = ClusterDetector::new(&memory, RuleSet::default(), 12)
        .detect_at(now)
        .expect("detect memory");
    let from_sqlite = ClusterDetector::new(&sqlite, RuleSet::default(), 12)
        .detect_at(now)
        .expect("detect sqlite");

    assert_eq!(from_memory.clusters_detected, 1);
    assert_eq!(from_memory.clusters[0].area.as_str(), "Mumbai");
    assert_eq!(from_sqlite.clusters[0].area.as_str(), "Mumbai");
}
