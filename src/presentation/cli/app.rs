use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// epiwatch: disease-outbreak early warning from citizen symptom reports
///
/// Aggregates recent reports per location, flags likely outbreak clusters,
/// and raises proactive alerts from weather and cluster signals.
#[derive(Parser, Debug)]
#[command(name = "epiwatch")]
#[command(version, about, long_about)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to custom config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Record a citizen symptom report
    #[command(alias = "r")]
    Report {
        /// Location (ward, district or city)
        location: String,

        /// Symptom tags, e.g. fever cough body_ache
        #[arg(required = true, num_args = 1..)]
        symptoms: Vec<String>,
    },

    /// Run cluster detection over the recent window
    #[command(alias = "d")]
    Detect {
        /// Attach an AI narrative to the result
        #[arg(long)]
        ai: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Evaluate proactive alerts from weather and/or current clusters
    #[command(alias = "e")]
    Evaluate {
        /// Area the weather readings belong to
        #[arg(long, requires_all = ["rainfall", "humidity", "temperature"])]
        area: Option<String>,

        /// Rainfall in millimetres
        #[arg(long, requires = "area")]
        rainfall: Option<f64>,

        /// Relative humidity in percent
        #[arg(long, requires = "area")]
        humidity: Option<f64>,

        /// Temperature in degrees Celsius
        #[arg(long, requires = "area")]
        temperature: Option<f64>,

        /// Include the clusters detected right now
        #[arg(long)]
        clusters: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List recently raised alerts
    #[command(alias = "a")]
    Alerts {
        /// Number of alerts to show
        #[arg(short = 'n', long, default_value = "20")]
        count: usize,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Poll detection and escalation until interrupted
    Daemon {
        /// Polling interval in seconds (default: config)
        #[arg(short, long)]
        interval: Option<u64>,
    },

    /// Delete reports older than the retention window
    Purge,
}
