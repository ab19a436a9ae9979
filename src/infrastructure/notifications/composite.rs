use crate::domain::entities::alert::ProactiveAlert;
use crate::domain::ports::notifier::{NotificationError, Notifier};

/// Forwards notifications to multiple notifiers.
///
/// Calls each notifier in order. Returns the first error encountered,
/// but always calls all notifiers.
pub struct CompositeNotifier {
    notifiers: Vec<Box<dyn Notifier>>,
}

impl CompositeNotifier {
    #[must_use]
    pub fn new(notifiers: Vec<Box<dyn Notifier>>) -> Self {
        Self { notifiers }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.notifiers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notifiers.is_empty()
    }
}

impl Default for CompositeNotifier {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Notifier for CompositeNotifier {
    fn notify(&self, alert: &ProactiveAlert) -> Result<(), NotificationError> {
        let mut first_error = None;
        for notifier in &self.notifiers {
            if let Err(e) = notifier.notify(alert) {
                tracing::warn!("Notification failed: {e}");
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}
