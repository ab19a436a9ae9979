use crate::domain::entities::alert::ProactiveAlert;

/// Decides whether an evaluated alert is dispatched.
///
/// Sits between evaluation and persistence so repeated alerts can be
/// suppressed without touching the evaluator rules.
pub trait AlertGate: Send + Sync {
    /// Returns `true` if the alert should be persisted and broadcast.
    fn admit(&self, alert: &ProactiveAlert) -> bool;
}
