use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::severity::Severity;

pub const ALERT_TYPE: &str = "proactive";
pub const ALERT_SOURCE: &str = "proactive-engine";

/// Which evaluator rule produced an alert
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    VectorBorne,
    PostFlood,
    OutbreakEscalation,
}

impl AlertKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::VectorBorne => "vector_borne",
            Self::PostFlood => "post_flood",
            Self::OutbreakEscalation => "outbreak_escalation",
        }
    }
}

impl std::fmt::Display for AlertKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AlertKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vector_borne" => Ok(Self::VectorBorne),
            "post_flood" => Ok(Self::PostFlood),
            "outbreak_escalation" => Ok(Self::OutbreakEscalation),
            other => Err(format!("unknown alert kind: {other}")),
        }
    }
}

/// An alert raised from environmental or cluster signals.
///
/// Serializes to the persisted record shape
/// `{type: "proactive", message, severity, area, source: "proactive-engine"}`
/// plus `kind` and `createdAt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProactiveAlert {
    #[serde(rename = "type")]
    pub alert_type: String,
    pub kind: AlertKind,
    pub message: String,
    pub severity: Severity,
    pub area: String,
    pub source: String,
    pub created_at: DateTime<Utc>,
}

impl ProactiveAlert {
    #[must_use]
    pub fn new(
        kind: AlertKind,
        severity: Severity,
        area: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            alert_type: ALERT_TYPE.to_string(),
            kind,
            message: message.into(),
            severity,
            area: area.into(),
            source: ALERT_SOURCE.to_string(),
            created_at: Utc::now(),
        }
    }
}
