use crate::domain::value_objects::symptom::Symptom;

use super::{OutbreakRule, MAX_CONFIDENCE};

/// Fever cluster: 10 or more fever reports in a location.
#[must_use]
pub fn viral_rule() -> OutbreakRule {
    OutbreakRule {
        id: "viral".to_string(),
        label: "Viral Fever".to_string(),
        symptoms: vec![Symptom::Fever],
        min_count: 10,
        base_confidence: 0.5,
        scale: 40.0,
        max_confidence: MAX_CONFIDENCE,
        actions: vec![
            "Deploy mobile fever clinics to the area".to_string(),
            "Increase testing for dengue and malaria".to_string(),
            "Issue a public health advisory".to_string(),
        ],
    }
}
