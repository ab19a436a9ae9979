pub mod alert_gate;
pub mod cluster_detector;
pub mod dashboard;
pub mod enrichment;
pub mod monitor;
pub mod proactive;
