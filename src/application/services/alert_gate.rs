use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::domain::entities::alert::{AlertKind, ProactiveAlert};
use crate::domain::ports::gate::AlertGate;
use crate::domain::value_objects::severity::Severity;

/// Lets every alert through. Repeated conditions re-emit on every call.
pub struct AdmitAll;

impl AlertGate for AdmitAll {
    fn admit(&self, _alert: &ProactiveAlert) -> bool {
        true
    }
}

type Fingerprint = (AlertKind, String, Severity, String);

/// Suppresses an alert identical to one admitted less than `window` ago.
///
/// Identity is (kind, area key, severity, message).
pub struct RecentAlertGate {
    window: Duration,
    last_sent: Mutex<HashMap<Fingerprint, Instant>>,
}

impl RecentAlertGate {
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_sent: Mutex::new(HashMap::new()),
        }
    }

    fn fingerprint(alert: &ProactiveAlert) -> Fingerprint {
        (
            alert.kind,
            alert.area.to_lowercase(),
            alert.severity,
            alert.message.clone(),
        )
    }
}

impl AlertGate for RecentAlertGate {
    fn admit(&self, alert: &ProactiveAlert) -> bool {
        let Ok(mut guard) = self.last_sent.lock() else {
            tracing::warn!("alert gate lock poisoned, admitting alert");
            return true;
        };
        let now = Instant::now();
        guard.retain(|_, sent| now.duration_since(*sent) < self.window);

        let key = Self::fingerprint(alert);
        if guard.contains_key(&key) {
            return false;
        }
        guard.insert(key, now);
        drop(guard);
        true
    }
}
