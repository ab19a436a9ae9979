use crate::domain::value_objects::symptom::Symptom;

use super::{OutbreakRule, MAX_CONFIDENCE};

/// Cough cluster: 10 or more cough reports in a location.
#[must_use]
pub fn respiratory_rule() -> OutbreakRule {
    OutbreakRule {
        id: "respiratory".to_string(),
        label: "Respiratory Infection".to_string(),
        symptoms: vec![Symptom::Cough],
        min_count: 10,
        base_confidence: 0.5,
        scale: 40.0,
        max_confidence: MAX_CONFIDENCE,
        actions: vec![
            "Distribute masks in the affected area".to_string(),
            "Set up respiratory screening camps".to_string(),
            "Cross-check local air quality readings".to_string(),
        ],
    }
}
