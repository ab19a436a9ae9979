use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use epiwatch::application::config::{AppConfig, NotificationConfig};
use epiwatch::application::services::alert_gate::{AdmitAll, RecentAlertGate};
use epiwatch::application::services::cluster_detector::ClusterDetector;
use epiwatch::application::services::monitor::OutbreakMonitor;
use epiwatch::application::services::proactive::ProactiveEvaluator;
use epiwatch::domain::entities::weather::WeatherContext;
use epiwatch::domain::ports::gate::AlertGate;
use epiwatch::domain::ports::notifier::Notifier;
use epiwatch::domain::value_objects::severity::Severity;
use epiwatch::domain::value_objects::thresholds::EscalationThresholds;
use epiwatch::infrastructure::ai::create_enricher;
use epiwatch::infrastructure::notifications::composite::CompositeNotifier;
use epiwatch::infrastructure::notifications::log_file::LogFileNotifier;
use epiwatch::infrastructure::notifications::terminal::TerminalNotifier;
use epiwatch::infrastructure::notifications::webhook::WebhookNotifier;
use epiwatch::infrastructure::persistence::sqlite_store::SqliteStore;
use epiwatch::presentation::cli::app::{Cli, Commands};
use epiwatch::presentation::cli::commands::alerts::run_alerts;
use epiwatch::presentation::cli::commands::daemon::run_daemon;
use epiwatch::presentation::cli::commands::detect::run_detect;
use epiwatch::presentation::cli::commands::evaluate::run_evaluate;
use epiwatch::presentation::cli::commands::purge::run_purge;
use epiwatch::presentation::cli::commands::report::run_report;

fn print_banner() {
    println!("{}", "━".repeat(40).cyan());
    println!("{}", "  EPIWATCH · Outbreak Monitor".bold().cyan());
    println!("{}", "━".repeat(40).cyan());
}

fn setup_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_notifier(config: &NotificationConfig) -> CompositeNotifier {
    let mut notifiers: Vec<Box<dyn Notifier>> = Vec::new();
    if config.terminal {
        notifiers.push(Box::new(TerminalNotifier::new()));
    }
    if let Some(ref path) = config.log_file {
        notifiers.push(Box::new(LogFileNotifier::new(path)));
    }
    if let Some(ref url) = config.webhook_url {
        let min_severity = config.webhook_min_severity.unwrap_or(Severity::High);
        match WebhookNotifier::new(url.clone(), min_severity) {
            Ok(webhook) => notifiers.push(Box::new(webhook)),
            Err(e) => tracing::warn!("Webhook disabled: {e}"),
        }
    }
    let composite = CompositeNotifier::new(notifiers);
    if composite.is_empty() {
        tracing::warn!("No notification channel enabled; alerts are only persisted");
    } else {
        tracing::debug!("{} notification channel(s) active", composite.len());
    }
    composite
}

fn build_gate(dedup_window_secs: Option<u64>) -> Box<dyn AlertGate> {
    match dedup_window_secs {
        Some(secs) if secs > 0 => Box::new(RecentAlertGate::new(Duration::from_secs(secs))),
        _ => Box::new(AdmitAll),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_tracing(cli.verbose);

    let config = if let Some(ref path) = cli.config {
        AppConfig::load_from(path)?
    } else {
        AppConfig::load()?
    };

    // Manual DI: main.rs is the only place that knows concrete types
    let store = SqliteStore::new(&config.database.path).context("Failed to open database")?;
    let rules = config.rule_set()?;
    let thresholds = EscalationThresholds::from(&config.escalation);
    let notifier = build_notifier(&config.notifications);
    let gate = build_gate(config.escalation.dedup_window_secs);
    let enricher = create_enricher(&config.ai);
    let ai_timeout = Duration::from_secs(config.ai.timeout_secs);

    let detector = ClusterDetector::new(&store, rules, config.detection.window_hours);
    let evaluator = ProactiveEvaluator::new(thresholds, &store, &notifier, &*gate);
    let monitor = OutbreakMonitor::new(
        &detector,
        &evaluator,
        &*enricher,
        &store,
        config.ai.enabled,
        ai_timeout,
        config.general.retention_hours,
    );

    match cli.command {
        Some(Commands::Report { location, symptoms }) => {
            run_report(&store, &location, &symptoms)?;
        }
        Some(Commands::Detect { ai, json }) => {
            run_detect(&detector, &*enricher, ai_timeout, ai, json).await?;
        }
        Some(Commands::Evaluate {
            area,
            rainfall,
            humidity,
            temperature,
            clusters,
            json,
        }) => {
            let weather = match (area, rainfall, humidity, temperature) {
                (Some(area), Some(rainfall_mm), Some(humidity_percent), Some(temperature_c)) => {
                    Some(WeatherContext {
                        area,
                        rainfall_mm,
                        humidity_percent,
                        temperature_c,
                    })
                }
                _ => None,
            };
            run_evaluate(&evaluator, &detector, weather, clusters, json)?;
        }
        Some(Commands::Alerts { count, json }) => {
            run_alerts(&store, count, json)?;
        }
        Some(Commands::Purge) => {
            run_purge(&monitor)?;
        }
        Some(Commands::Daemon { interval }) => {
            print_banner();
            let interval_secs = interval.unwrap_or(config.general.interval_secs);
            run_daemon(&monitor, interval_secs).await?;
        }
        None => {
            print_banner();
            run_daemon(&monitor, config.general.interval_secs).await?;
        }
    }

    Ok(())
}
