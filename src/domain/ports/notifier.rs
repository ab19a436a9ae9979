use thiserror::Error;

use crate::domain::entities::alert::ProactiveAlert;

#[derive(Error, Debug)]
pub enum NotificationError {
    #[error("failed to send notification: {0}")]
    SendFailed(String),
    #[error("notification channel unavailable: {0}")]
    ChannelUnavailable(String),
}

/// Broadcast channel towards subscribers (dashboard, sockets, hooks).
pub trait Notifier: Send + Sync {
    /// Broadcast a proactive alert.
    ///
    /// # Errors
    ///
    /// Returns `NotificationError` if the notification fails to send
    /// or the channel is unavailable.
    fn notify(&self, alert: &ProactiveAlert) -> Result<(), NotificationError>;
}
