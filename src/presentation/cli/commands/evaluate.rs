use anyhow::Context;

use crate::application::services::cluster_detector::ClusterDetector;
use crate::application::services::proactive::{
    DispatchedAlert, ProactiveContext, ProactiveEvaluator,
};
use crate::domain::entities::weather::WeatherContext;
use crate::presentation::cli::formatters::alert_fmt;
use crate::presentation::cli::formatters::cluster_fmt::print_section_header;

/// Runs the proactive evaluator once and prints what was dispatched.
///
/// `include_clusters` runs a detection pass first and feeds its clusters to
/// the evaluator.
///
/// # Errors
///
/// Returns an error if the requested detection pass fails or JSON
/// serialization fails.
pub fn run_evaluate(
    evaluator: &ProactiveEvaluator<'_>,
    detector: &ClusterDetector<'_>,
    weather: Option<WeatherContext>,
    include_clusters: bool,
    json: bool,
) -> anyhow::Result<Vec<DispatchedAlert>> {
    let mut context = ProactiveContext::default();
    if let Some(weather) = weather {
        context = context.with_weather(weather);
    }
    if include_clusters {
        let analysis = detector
            .detect()
            .context("Cannot evaluate clusters: detection failed")?;
        context = context.with_clusters(analysis.clusters);
    }

    let dispatched = evaluator.check_proactive_alerts(&context);

    if json {
        println!("{}", serde_json::to_string_pretty(&dispatched)?);
    } else {
        print_section_header("📡 Proactive evaluation");
        if dispatched.is_empty() {
            alert_fmt::print_no_alerts();
        } else {
            println!("{} alert(s) raised:", dispatched.len());
            alert_fmt::format_dispatched(&dispatched);
        }
    }
    Ok(dispatched)
}
