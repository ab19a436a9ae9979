pub mod location;
pub mod severity;
pub mod symptom;
pub mod thresholds;

pub use location::Location;
pub use severity::Severity;
pub use symptom::Symptom;
pub use thresholds::EscalationThresholds;
