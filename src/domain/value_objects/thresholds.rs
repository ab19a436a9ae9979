use serde::{Deserialize, Serialize};

/// Thresholds used by the proactive alert evaluator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EscalationThresholds {
    /// Rainfall (mm) above which vector-borne risk is considered
    pub vector_rainfall_mm: f64,
    /// Humidity (%) above which vector-borne risk is considered
    pub vector_humidity_percent: f64,
    /// Temperature (°C) that must be exceeded for vector-borne risk
    pub vector_temperature_c: f64,
    /// Humidity (%) above which a vector-borne alert is raised to HIGH
    pub vector_high_humidity_percent: f64,
    /// Rainfall (mm) above which post-flood waterborne risk fires
    pub flood_rainfall_mm: f64,
    /// Minimum cluster confidence for an outbreak escalation
    pub outbreak_min_confidence: f64,
    /// Minimum reports behind a cluster for an outbreak escalation
    pub outbreak_min_reports: u32,
}

impl Default for EscalationThresholds {
    fn default() -> Self {
        Self {
            vector_rainfall_mm: 20.0,
            vector_humidity_percent: 80.0,
            vector_temperature_c: 25.0,
            vector_high_humidity_percent: 85.0,
            flood_rainfall_mm: 50.0,
            outbreak_min_confidence: 0.7,
            outbreak_min_reports: 5,
        }
    }
}
