use std::time::Duration;

use serde_json::{json, Value};
use tokio::runtime::{Handle, RuntimeFlavor};
use tracing::warn;

use crate::domain::entities::alert::ProactiveAlert;
use crate::domain::ports::notifier::{NotificationError, Notifier};
use crate::domain::value_objects::severity::Severity;

/// Webhook notification format, auto-detected from the URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WebhookFormat {
    Slack,
    Discord,
    Generic,
}

/// Posts proactive alerts to an HTTP webhook endpoint.
///
/// Supports Slack (colored attachments), Discord (embeds) and a generic
/// payload carrying the alert record as-is. The format is auto-detected
/// from the webhook URL.
///
/// Alerts below `min_severity` are skipped. Transport errors and non-2xx
/// responses are returned as `SendFailed`.
pub struct WebhookNotifier {
    url: String,
    client: reqwest::Client,
    min_severity: Severity,
}

impl WebhookNotifier {
    /// Creates a new webhook notifier targeting the given URL.
    ///
    /// The HTTP client is configured with a 5-second timeout covering
    /// DNS resolution, connection, and response.
    ///
    /// # Errors
    ///
    /// Returns `NotificationError::ChannelUnavailable` if the HTTP client
    /// cannot be initialized (e.g. TLS backend failure).
    pub fn new(url: String, min_severity: Severity) -> Result<Self, NotificationError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| {
                NotificationError::ChannelUnavailable(format!("cannot build HTTP client: {e}"))
            })?;

        Ok(Self {
            url,
            client,
            min_severity,
        })
    }

    fn detect_format(&self) -> WebhookFormat {
        // Match on the host only, not on arbitrary substrings of the URL
        let host = self
            .url
            .split("//")
            .nth(1)
            .and_then(|s| s.split('/').next())
            .and_then(|h| h.split(':').next())
            .unwrap_or("");

        if host == "hooks.slack.com" {
            WebhookFormat::Slack
        } else if host == "discord.com" || host == "discordapp.com" {
            WebhookFormat::Discord
        } else {
            WebhookFormat::Generic
        }
    }

    fn send_payload(&self, payload: &Value) -> Result<(), NotificationError> {
        let handle = Handle::try_current().map_err(|_| {
            NotificationError::ChannelUnavailable("webhook needs a tokio runtime".into())
        })?;
        if handle.runtime_flavor() != RuntimeFlavor::MultiThread {
            return Err(NotificationError::ChannelUnavailable(
                "webhook needs a multi-threaded runtime".into(),
            ));
        }

        let result = tokio::task::block_in_place(|| {
            handle.block_on(self.client.post(&self.url).json(payload).send())
        });

        match result {
            Ok(resp) if resp.status().is_success() => Ok(()),
            Ok(resp) => {
                warn!("Webhook HTTP {}", resp.status());
                Err(NotificationError::SendFailed(format!(
                    "webhook returned HTTP {}",
                    resp.status()
                )))
            }
            Err(e) => {
                warn!("Webhook error: {e}");
                Err(NotificationError::SendFailed(format!("webhook request failed: {e}")))
            }
        }
    }

    const fn severity_color_hex(severity: Severity) -> &'static str {
        match severity {
            Severity::Low => "#3498DB",
            Severity::Medium => "#E67E22",
            Severity::High => "#E74C3C",
            Severity::Critical => "#FF0000",
        }
    }

    const fn severity_color_decimal(severity: Severity) -> u32 {
        match severity {
            Severity::Low => 0x00_34_98_DB,
            Severity::Medium => 0x00_E6_7E_22,
            Severity::High => 0x00_E7_4C_3C,
            Severity::Critical => 0x00_FF_00_00,
        }
    }

    fn format_alert(&self, alert: &ProactiveAlert) -> Value {
        match self.detect_format() {
            WebhookFormat::Slack => Self::format_alert_slack(alert),
            WebhookFormat::Discord => Self::format_alert_discord(alert),
            WebhookFormat::Generic => Self::format_alert_generic(alert),
        }
    }

    fn format_alert_slack(alert: &ProactiveAlert) -> Value {
        json!({
            "attachments": [{
                "color": Self::severity_color_hex(alert.severity),
                "blocks": [
                    {
                        "type": "header",
                        "text": {
                            "type": "plain_text",
                            "text": format!("{} EpiWatch: {}", alert.severity.emoji(), alert.area)
                        }
                    },
                    {
                        "type": "section",
                        "fields": [
                            { "type": "mrkdwn", "text": format!("*Severity:*\n{}", alert.severity) },
                            { "type": "mrkdwn", "text": format!("*Kind:*\n{}", alert.kind) }
                        ]
                    },
                    {
                        "type": "section",
                        "text": { "type": "mrkdwn", "text": &alert.message }
                    }
                ]
            }]
        })
    }

    fn format_alert_discord(alert: &ProactiveAlert) -> Value {
        json!({
            "username": "EpiWatch",
            "embeds": [{
                "title": format!("{} {}", alert.severity.emoji(), alert.area),
                "description": &alert.message,
                "color": Self::severity_color_decimal(alert.severity),
                "fields": [
                    { "name": "Severity", "value": alert.severity.to_string(), "inline": true },
                    { "name": "Kind", "value": alert.kind.as_str(), "inline": true }
                ],
                "timestamp": alert.created_at.to_rfc3339()
            }]
        })
    }

    fn format_alert_generic(alert: &ProactiveAlert) -> Value {
        serde_json::to_value(alert).unwrap_or_else(|e| {
            warn!("Cannot serialize alert for webhook: {e}");
            json!({ "type": &alert.alert_type, "message": &alert.message })
        })
    }
}

impl Notifier for WebhookNotifier {
    fn notify(&self, alert: &ProactiveAlert) -> Result<(), NotificationError> {
        if alert.severity < self.min_severity {
            return Ok(());
        }
        let payload = self.format_alert(alert);
        self.send_payload(&payload)
    }
}
