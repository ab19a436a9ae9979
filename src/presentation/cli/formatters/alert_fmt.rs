use colored::Colorize;

use crate::application::services::proactive::DispatchedAlert;
use crate::domain::entities::alert::ProactiveAlert;
use crate::domain::value_objects::severity::Severity;

/// Strips ANSI/OSC escape sequences from a string to prevent terminal injection.
#[must_use]
pub fn sanitize_terminal(input: &str) -> String {
    input.chars().filter(|c| *c != '\x1b').collect()
}

fn severity_badge(severity: Severity) -> String {
    let label = format!(" {severity} ");
    match severity {
        Severity::Critical => format!("{}", label.on_red().white().bold()),
        Severity::High => format!("{}", label.on_yellow().black().bold()),
        Severity::Medium => format!("{}", label.on_bright_yellow().black()),
        Severity::Low => format!("{}", label.on_blue().white()),
    }
}

fn delivery_badge(ok: bool, label: &str) -> String {
    if ok {
        format!("{}", format!("✓ {label}").green())
    } else {
        format!("{}", format!("✗ {label}").red().bold())
    }
}

fn print_alert(alert: &ProactiveAlert) {
    println!(
        "{} {} {} {}",
        severity_badge(alert.severity),
        alert.severity.emoji(),
        sanitize_terminal(&alert.area).bold(),
        format!("[{}]", alert.kind).dimmed()
    );
    println!("  {}", sanitize_terminal(&alert.message));
}

/// Prints persisted alerts, newest first.
pub fn format_alerts(alerts: &[ProactiveAlert]) {
    for alert in alerts {
        println!();
        print_alert(alert);
        println!(
            "  {}",
            alert
                .created_at
                .format("%Y-%m-%d %H:%M:%S UTC")
                .to_string()
                .dimmed()
        );
    }
    println!();
}

/// Prints alerts raised by an evaluation with their delivery outcome.
pub fn format_dispatched(dispatched: &[DispatchedAlert]) {
    for entry in dispatched {
        println!();
        print_alert(&entry.alert);
        println!(
            "  {}  {}",
            delivery_badge(entry.persisted, "stored"),
            delivery_badge(entry.broadcast, "broadcast")
        );
    }
    println!();
}

pub fn print_no_alerts() {
    println!();
    println!("{}", "✅ No proactive alerts".green().bold());
    println!();
}
