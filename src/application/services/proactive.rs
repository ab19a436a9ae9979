use serde::Serialize;

use crate::domain::entities::alert::{AlertKind, ProactiveAlert};
use crate::domain::entities::cluster::ClusterResult;
use crate::domain::entities::weather::WeatherContext;
use crate::domain::ports::gate::AlertGate;
use crate::domain::ports::notifier::Notifier;
use crate::domain::ports::store::AlertSink;
use crate::domain::value_objects::severity::Severity;
use crate::domain::value_objects::thresholds::EscalationThresholds;

/// Signals handed to the evaluator. Either part may be missing.
#[derive(Debug, Clone, Default)]
pub struct ProactiveContext {
    pub weather: Option<WeatherContext>,
    pub clusters: Option<Vec<ClusterResult>>,
}

impl ProactiveContext {
    #[must_use]
    pub fn with_weather(mut self, weather: WeatherContext) -> Self {
        self.weather = Some(weather);
        self
    }

    #[must_use]
    pub fn with_clusters(mut self, clusters: Vec<ClusterResult>) -> Self {
        self.clusters = Some(clusters);
        self
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.weather.is_none() && self.clusters.is_none()
    }
}

/// An evaluated alert with the outcome of each delivery step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchedAlert {
    pub alert: ProactiveAlert,
    pub persisted: bool,
    pub broadcast: bool,
}

/// Turns weather and cluster signals into proactive alerts.
pub struct ProactiveEvaluator<'a> {
    thresholds: EscalationThresholds,
    sink: &'a dyn AlertSink,
    notifier: &'a dyn Notifier,
    gate: &'a dyn AlertGate,
}

impl<'a> ProactiveEvaluator<'a> {
    #[must_use]
    pub const fn new(
        thresholds: EscalationThresholds,
        sink: &'a dyn AlertSink,
        notifier: &'a dyn Notifier,
        gate: &'a dyn AlertGate,
    ) -> Self {
        Self {
            thresholds,
            sink,
            notifier,
            gate,
        }
    }

    /// Applies the evaluator rules without side effects.
    ///
    /// Order: vector-borne, post-flood, then one escalation per qualifying
    /// cluster in input order.
    #[must_use]
    pub fn evaluate(&self, context: &ProactiveContext) -> Vec<ProactiveAlert> {
        if context.is_empty() {
            tracing::debug!("proactive check called without weather or clusters");
            return Vec::new();
        }

        let mut alerts = Vec::new();
        if let Some(weather) = &context.weather {
            alerts.extend(self.vector_borne(weather));
            alerts.extend(self.post_flood(weather));
        }
        if let Some(clusters) = &context.clusters {
            alerts.extend(clusters.iter().filter_map(|c| self.escalation(c)));
        }
        alerts
    }

    /// Evaluates, then persists and broadcasts every admitted alert once.
    ///
    /// A failed broadcast never prevents persistence; both outcomes are
    /// reported per alert.
    pub fn check_proactive_alerts(&self, context: &ProactiveContext) -> Vec<DispatchedAlert> {
        let mut dispatched = Vec::new();
        for alert in self.evaluate(context) {
            if !self.gate.admit(&alert) {
                tracing::debug!(kind = %alert.kind, area = %alert.area, "alert suppressed by gate");
                continue;
            }

            let persisted = match self.sink.save_alert(&alert) {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!("Failed to persist proactive alert: {e}");
                    false
                }
            };

            let broadcast = match self.notifier.notify(&alert) {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!("Proactive alert broadcast failed: {e}");
                    false
                }
            };

            tracing::info!(
                kind = %alert.kind,
                severity = %alert.severity,
                area = %alert.area,
                persisted,
                broadcast,
                "proactive alert dispatched"
            );
            dispatched.push(DispatchedAlert {
                alert,
                persisted,
                broadcast,
            });
        }
        dispatched
    }

    fn vector_borne(&self, weather: &WeatherContext) -> Option<ProactiveAlert> {
        let t = &self.thresholds;
        let wet = weather.rainfall_mm > t.vector_rainfall_mm
            || weather.humidity_percent > t.vector_humidity_percent;
        if !(wet && weather.temperature_c > t.vector_temperature_c) {
            return None;
        }
        let severity = if weather.humidity_percent > t.vector_high_humidity_percent {
            Severity::High
        } else {
            Severity::Medium
        };
        Some(ProactiveAlert::new(
            AlertKind::VectorBorne,
            severity,
            &weather.area,
            format!(
                "Vector-borne disease risk in {}: humidity {}%, rainfall {}mm, temperature {}\u{b0}C. \
                 Clear standing water and use mosquito nets.",
                weather.area, weather.humidity_percent, weather.rainfall_mm, weather.temperature_c
            ),
        ))
    }

    fn post_flood(&self, weather: &WeatherContext) -> Option<ProactiveAlert> {
        if weather.rainfall_mm <= self.thresholds.flood_rainfall_mm {
            return None;
        }
        Some(ProactiveAlert::new(
            AlertKind::PostFlood,
            Severity::High,
            &weather.area,
            format!(
                "Post-flood waterborne disease risk in {}: rainfall {}mm. \
                 Boil drinking water and avoid contact with flood water.",
                weather.area, weather.rainfall_mm
            ),
        ))
    }

    fn escalation(&self, cluster: &ClusterResult) -> Option<ProactiveAlert> {
        let t = &self.thresholds;
        if cluster.confidence < t.outbreak_min_confidence
            || cluster.total_reports < t.outbreak_min_reports
        {
            return None;
        }
        let mut message = format!(
            "Possible {} outbreak in {} ({} rule): {} reports, confidence {:.0}%.",
            cluster.predicted_disease_type,
            cluster.area,
            cluster.detection_rule,
            cluster.total_reports,
            cluster.confidence * 100.0
        );
        if !cluster.recommended_actions.is_empty() {
            message.push_str(" Recommended: ");
            message.push_str(&cluster.recommended_actions.join("; "));
        }
        Some(ProactiveAlert::new(
            AlertKind::OutbreakEscalation,
            Severity::Critical,
            cluster.area.as_str(),
            message,
        ))
    }
}
