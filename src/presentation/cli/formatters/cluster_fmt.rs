use colored::{ColoredString, Colorize};

use super::alert_fmt::sanitize_terminal;
use crate::application::services::dashboard::DashboardView;
use crate::domain::entities::cluster::{ClusterNarrative, ClusterResult};

#[must_use]
pub fn confidence_bar(confidence: f64, width: usize) -> String {
    let ratio = confidence.clamp(0.0, 1.0);
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    let filled = (ratio * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);

    let bar_filled = "█".repeat(filled);
    let bar_empty = "░".repeat(empty);

    let colored_bar = if confidence >= 0.8 {
        bar_filled.red().bold()
    } else if confidence >= 0.6 {
        bar_filled.yellow()
    } else {
        bar_filled.green()
    };

    format!("{colored_bar}{bar_empty}")
}

#[must_use]
pub fn colorize_confidence(confidence: f64) -> ColoredString {
    let text = format!("{:.0}%", confidence * 100.0);
    if confidence >= 0.8 {
        text.red().bold()
    } else if confidence >= 0.6 {
        text.yellow()
    } else {
        text.green()
    }
}

pub fn print_section_header(title: &str) {
    println!("{}", title.bold().cyan());
    let display_width = title.chars().count();
    println!("{}", "─".repeat(display_width).cyan());
}

fn print_cluster(cluster: &ClusterResult) {
    println!(
        "\n{} {} {}",
        cluster.predicted_disease_type.bold(),
        "in".dimmed(),
        sanitize_terminal(cluster.area.as_str()).bold()
    );
    println!(
        "  {} {}  {} reports  {}",
        confidence_bar(cluster.confidence, 20),
        colorize_confidence(cluster.confidence),
        cluster.total_reports,
        format!("[{}]", cluster.detection_rule).dimmed()
    );
    let counts: Vec<String> = cluster
        .symptom_counts
        .iter()
        .map(|(symptom, count)| format!("{symptom} {count}"))
        .collect();
    println!("  {}", counts.join(" · ").dimmed());
    for action in &cluster.recommended_actions {
        println!("  {} {action}", "→".cyan());
    }
}

fn print_narrative(narrative: &ClusterNarrative) {
    print_section_header("\n🤖 AI summary");
    println!("  {}", narrative.summary.bold());
    if !narrative.details.is_empty() {
        println!("  {}", narrative.details);
    }
}

pub fn format_dashboard(view: &DashboardView) {
    match view {
        DashboardView::ClustersDetected {
            analysed_at,
            window_hours,
            clusters_detected,
            clusters,
            narrative,
        } => {
            print_section_header(&format!(
                "🦠 {clusters_detected} cluster(s), last {window_hours}h"
            ));
            println!(
                "{}",
                analysed_at
                    .format("analysed %Y-%m-%d %H:%M UTC")
                    .to_string()
                    .dimmed()
            );
            for cluster in clusters {
                print_cluster(cluster);
            }
            if let Some(narrative) = narrative {
                print_narrative(narrative);
            }
            println!();
        }
        DashboardView::NoClusters {
            analysed_at,
            window_hours,
        } => {
            println!();
            println!(
                "{} {}",
                format!("✅ No clusters in the last {window_hours}h").green().bold(),
                analysed_at.format("(%Y-%m-%d %H:%M UTC)").to_string().dimmed()
            );
            println!();
        }
        DashboardView::DetectionFailed { error, retryable } => {
            println!();
            println!("{} {error}", "❌ Detection failed:".red().bold());
            if *retryable {
                println!("  {}", "The report store may recover; retry shortly.".dimmed());
            }
            println!();
        }
    }
}
