use std::borrow::Cow;

use colored::Colorize;

use crate::domain::entities::alert::ProactiveAlert;
use crate::domain::ports::notifier::{NotificationError, Notifier};
use crate::domain::value_objects::severity::Severity;

const SEPARATOR_WIDTH: usize = 70;

/// Prints alerts to stdout as a framed block.
#[derive(Default)]
pub struct TerminalNotifier;

impl TerminalNotifier {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, alert: &ProactiveAlert) -> Result<(), NotificationError> {
        let separator = "\u{2500}".repeat(SEPARATOR_WIDTH);

        println!("\n{}", separator.dimmed());
        println!(
            "{} {} {}",
            severity_badge(alert.severity),
            sanitize(&alert.area).bold(),
            format!("[{}]", alert.kind).dimmed()
        );
        println!("{}", separator.dimmed());
        println!("{}", sanitize(&alert.message));
        println!(
            "{}",
            alert
                .created_at
                .format("%Y-%m-%d %H:%M:%S UTC")
                .to_string()
                .dimmed()
        );
        println!("{}\n", separator.dimmed());
        Ok(())
    }
}

/// Strip ANSI escape sequences and C0/C1 control characters from a string,
/// preserving only printable content, newlines, and tabs.
fn sanitize(s: &str) -> Cow<'_, str> {
    if s.bytes()
        .any(|b| matches!(b, 0x00..=0x08 | 0x0B..=0x0C | 0x0E..=0x1F | 0x7F))
    {
        Cow::Owned(
            s.chars()
                .filter(|&c| !matches!(c as u32, 0x00..=0x08 | 0x0B..=0x0C | 0x0E..=0x1F | 0x7F))
                .collect(),
        )
    } else {
        Cow::Borrowed(s)
    }
}

#[must_use]
fn severity_badge(severity: Severity) -> String {
    let label = format!(" {} {} ", severity.emoji(), severity);
    match severity {
        Severity::Critical => label.on_red().white().bold().to_string(),
        Severity::High => label.on_yellow().black().bold().to_string(),
        Severity::Medium => label.on_bright_yellow().black().to_string(),
        Severity::Low => label.on_blue().white().to_string(),
    }
}
