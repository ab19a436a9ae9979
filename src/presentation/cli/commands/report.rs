use anyhow::Context;
use chrono::Utc;
use colored::Colorize;

use crate::domain::entities::report::SymptomReport;
use crate::domain::ports::store::ReportStore;
use crate::presentation::cli::formatters::alert_fmt::sanitize_terminal;

/// Validates and stores one citizen symptom report.
///
/// # Errors
///
/// Returns an error if the input is invalid or the report cannot be stored.
pub fn run_report(
    store: &dyn ReportStore,
    location: &str,
    symptoms: &[String],
) -> anyhow::Result<SymptomReport> {
    let report =
        SymptomReport::new(location, symptoms, Utc::now()).context("Invalid symptom report")?;
    store
        .save_report(&report)
        .context("Failed to store symptom report")?;

    tracing::debug!(
        location = report.location.key(),
        symptoms = report.symptoms.len(),
        "report stored"
    );

    let tags: Vec<&str> = report.symptoms.iter().map(|s| s.as_str()).collect();
    println!(
        "{} {} {}",
        "✓ Report recorded:".green().bold(),
        sanitize_terminal(report.location.as_str()).bold(),
        format!("({})", tags.join(", ")).dimmed()
    );
    Ok(report)
}
