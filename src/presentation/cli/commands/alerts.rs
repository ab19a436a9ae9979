use anyhow::Context;

use crate::domain::ports::store::AlertSink;
use crate::presentation::cli::formatters::alert_fmt;
use crate::presentation::cli::formatters::cluster_fmt::print_section_header;

/// Lists the most recent persisted alerts, newest first.
///
/// # Errors
///
/// Returns an error if the store query fails or JSON serialization fails.
pub fn run_alerts(sink: &dyn AlertSink, count: usize, json: bool) -> anyhow::Result<()> {
    if count == 0 {
        anyhow::bail!("Alert count must be greater than 0");
    }
    let alerts = sink
        .get_recent_alerts(count)
        .context("Failed to read recent alerts")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&alerts)?);
        return Ok(());
    }

    print_section_header("🔔 Recent alerts");
    if alerts.is_empty() {
        alert_fmt::print_no_alerts();
    } else {
        alert_fmt::format_alerts(&alerts);
    }
    Ok(())
}
