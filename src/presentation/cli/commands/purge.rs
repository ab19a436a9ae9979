use anyhow::Context;
use chrono::Utc;
use colored::Colorize;

use crate::application::services::monitor::OutbreakMonitor;

/// Deletes reports older than the retention window.
///
/// # Errors
///
/// Returns an error if the deletion fails.
pub fn run_purge(monitor: &OutbreakMonitor<'_>) -> anyhow::Result<usize> {
    let removed = monitor
        .purge_expired(Utc::now())
        .context("Failed to purge expired reports")?;
    println!(
        "{} {removed} expired report(s) removed",
        "✓".green().bold()
    );
    Ok(removed)
}
