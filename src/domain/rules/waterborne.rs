use crate::domain::value_objects::symptom::Symptom;

use super::{OutbreakRule, MAX_CONFIDENCE};

/// Gastrointestinal cluster: vomiting and diarrhea together reach 8.
#[must_use]
pub fn waterborne_rule() -> OutbreakRule {
    OutbreakRule {
        id: "waterborne".to_string(),
        label: "Waterborne Disease".to_string(),
        symptoms: vec![Symptom::Vomiting, Symptom::Diarrhea],
        min_count: 8,
        base_confidence: 0.5,
        scale: 30.0,
        max_confidence: MAX_CONFIDENCE,
        actions: vec![
            "Test local drinking water sources".to_string(),
            "Distribute ORS packets and chlorine tablets".to_string(),
            "Issue a boil-water advisory".to_string(),
        ],
    }
}
