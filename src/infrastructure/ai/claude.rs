use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;

use crate::domain::entities::cluster::{ClusterAnalysis, ClusterNarrative};
use crate::domain::ports::enricher::{ClusterEnricher, EnrichmentError};

use super::prompt_builder::PromptBuilder;

/// Maximum response size from the claude CLI (4 MB).
const MAX_RESPONSE_BYTES: usize = 4 * 1024 * 1024;

/// Maximum stderr bytes included in error messages.
const MAX_STDERR_BYTES: usize = 512;

/// Narrates cluster analyses through the `claude` CLI.
pub struct ClaudeCliEnricher {
    cooldown_secs: u64,
    last_call: Mutex<Option<Instant>>,
    model: String,
    timeout_secs: u64,
}

impl ClaudeCliEnricher {
    #[must_use]
    pub const fn new(model: String, cooldown_secs: u64, timeout_secs: u64) -> Self {
        Self {
            cooldown_secs,
            last_call: Mutex::new(None),
            model,
            timeout_secs,
        }
    }

    /// Atomically check cooldown and claim the call slot.
    ///
    /// Returns `true` if the call is permitted (and records the timestamp),
    /// `false` if still within the cooldown window.
    fn try_claim(&self) -> Result<bool, EnrichmentError> {
        let mut guard = self
            .last_call
            .lock()
            .map_err(|e| EnrichmentError::ServiceUnavailable(format!("lock poisoned: {e}")))?;
        let allowed =
            guard.is_none_or(|last| last.elapsed() >= Duration::from_secs(self.cooldown_secs));
        if allowed {
            *guard = Some(Instant::now());
        }
        drop(guard);
        Ok(allowed)
    }
}

#[async_trait]
impl ClusterEnricher for ClaudeCliEnricher {
    async fn narrate(
        &self,
        analysis: &ClusterAnalysis,
    ) -> Result<Option<ClusterNarrative>, EnrichmentError> {
        if !self.try_claim()? {
            tracing::debug!("claude enricher in cooldown, skipping");
            return Ok(None);
        }

        let prompt = PromptBuilder::build(analysis);

        let output = tokio::time::timeout(
            Duration::from_secs(self.timeout_secs),
            tokio::process::Command::new("claude")
                .args([
                    "--print",
                    "--output-format",
                    "json",
                    "--model",
                    &self.model,
                    "--",
                    &prompt,
                ])
                .kill_on_drop(true)
                .output(),
        )
        .await
        .map_err(|_| EnrichmentError::Timeout)?
        .map_err(|e| EnrichmentError::ServiceUnavailable(format!("failed to run claude: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(
                &output.stderr[..output.stderr.len().min(MAX_STDERR_BYTES)],
            );
            return Err(EnrichmentError::ServiceUnavailable(format!(
                "claude exited with {}: {stderr}",
                output.status
            )));
        }

        if output.stdout.len() > MAX_RESPONSE_BYTES {
            return Err(EnrichmentError::InvalidResponse(format!(
                "response too large: {} bytes",
                output.stdout.len()
            )));
        }

        parse_response(&output.stdout).map(Some)
    }
}

#[derive(Deserialize)]
struct ClaudeCliResponse {
    result: String,
}

#[derive(Deserialize)]
struct RawNarrative {
    summary: String,
    details: String,
}

fn parse_response(stdout: &[u8]) -> Result<ClusterNarrative, EnrichmentError> {
    if stdout.is_empty() {
        return Err(EnrichmentError::InvalidResponse(
            "empty response from claude".into(),
        ));
    }

    let text = std::str::from_utf8(stdout)
        .map_err(|e| EnrichmentError::InvalidResponse(format!("invalid UTF-8: {e}")))?;

    let inner = match serde_json::from_str::<ClaudeCliResponse>(text) {
        Ok(envelope) => envelope.result,
        Err(_) => text.to_owned(),
    };

    let raw: RawNarrative = serde_json::from_str(inner.trim()).map_err(|e| {
        EnrichmentError::InvalidResponse(format!("failed to parse narrative: {e}"))
    })?;

    Ok(ClusterNarrative {
        generated_at: Utc::now(),
        summary: raw.summary,
        details: raw.details,
    })
}
