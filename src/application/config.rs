use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::application::services::cluster_detector::DEFAULT_WINDOW_HOURS;
use crate::application::services::monitor::DEFAULT_RETENTION_HOURS;
use crate::domain::rules::{default_rules, OutbreakRule, RuleSet};
use crate::domain::value_objects::severity::Severity;
use crate::domain::value_objects::thresholds::EscalationThresholds;

/// Top-level application configuration loaded from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub detection: DetectionConfig,
    #[serde(default)]
    pub escalation: EscalationConfig,
    #[serde(default)]
    pub ai: AiConfig,
    #[serde(default)]
    pub notifications: NotificationConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

/// General settings: polling interval and report retention.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_interval")]
    pub interval_secs: u64,
    #[serde(default = "default_retention_hours")]
    pub retention_hours: u32,
}

/// Cluster detection window and rule table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionConfig {
    #[serde(default = "default_window_hours")]
    pub window_hours: u32,
    #[serde(default = "default_rules")]
    pub rules: Vec<OutbreakRule>,
}

/// Proactive evaluator thresholds and optional repeat suppression.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EscalationConfig {
    #[serde(default = "default_vector_rainfall")]
    pub vector_rainfall_mm: f64,
    #[serde(default = "default_vector_humidity")]
    pub vector_humidity_percent: f64,
    #[serde(default = "default_vector_temperature")]
    pub vector_temperature_c: f64,
    #[serde(default = "default_vector_high_humidity")]
    pub vector_high_humidity_percent: f64,
    #[serde(default = "default_flood_rainfall")]
    pub flood_rainfall_mm: f64,
    #[serde(default = "default_outbreak_confidence")]
    pub outbreak_min_confidence: f64,
    #[serde(default = "default_outbreak_reports")]
    pub outbreak_min_reports: u32,
    /// Suppress identical alerts within this many seconds. Off when unset.
    #[serde(default)]
    pub dedup_window_secs: Option<u64>,
}

/// AI narrative provider settings (claude-cli or noop).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_cooldown")]
    pub cooldown_secs: u64,
    #[serde(default = "default_ai_timeout")]
    pub timeout_secs: u64,
}

/// Broadcast channels: terminal, JSON-lines log file, webhook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    #[serde(default = "default_true")]
    pub terminal: bool,
    #[serde(default)]
    pub log_file: Option<String>,
    #[serde(default)]
    pub webhook_url: Option<String>,
    #[serde(default)]
    pub webhook_min_severity: Option<Severity>,
}

/// Database storage path (tilde-expanded at point of use).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_path")]
    pub path: String,
}

// --- Defaults ---

const fn default_interval() -> u64 {
    300
}

const fn default_retention_hours() -> u32 {
    DEFAULT_RETENTION_HOURS
}

const fn default_window_hours() -> u32 {
    DEFAULT_WINDOW_HOURS
}

const fn default_vector_rainfall() -> f64 {
    20.0
}

const fn default_vector_humidity() -> f64 {
    80.0
}

const fn default_vector_temperature() -> f64 {
    25.0
}

const fn default_vector_high_humidity() -> f64 {
    85.0
}

const fn default_flood_rainfall() -> f64 {
    50.0
}

const fn default_outbreak_confidence() -> f64 {
    0.7
}

const fn default_outbreak_reports() -> u32 {
    5
}

const fn default_true() -> bool {
    true
}

fn default_provider() -> String {
    "claude-cli".into()
}

fn default_model() -> String {
    "claude-sonnet-4-20250514".into()
}

const fn default_cooldown() -> u64 {
    60
}

const fn default_ai_timeout() -> u64 {
    20
}

// Stored raw with the tilde; expanded with shellexpand at point of use.
fn default_database_path() -> String {
    "~/.local/share/epiwatch/epiwatch.db".into()
}

// --- Default impls ---

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval(),
            retention_hours: default_retention_hours(),
        }
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            window_hours: default_window_hours(),
            rules: default_rules(),
        }
    }
}

impl Default for EscalationConfig {
    fn default() -> Self {
        Self {
            vector_rainfall_mm: default_vector_rainfall(),
            vector_humidity_percent: default_vector_humidity(),
            vector_temperature_c: default_vector_temperature(),
            vector_high_humidity_percent: default_vector_high_humidity(),
            flood_rainfall_mm: default_flood_rainfall(),
            outbreak_min_confidence: default_outbreak_confidence(),
            outbreak_min_reports: default_outbreak_reports(),
            dedup_window_secs: None,
        }
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            provider: default_provider(),
            model: default_model(),
            cooldown_secs: default_cooldown(),
            timeout_secs: default_ai_timeout(),
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            terminal: default_true(),
            log_file: None,
            webhook_url: None,
            webhook_min_severity: None,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

// --- AppConfig methods ---

impl AppConfig {
    /// Load config from default path or create default config file
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be determined,
    /// the file cannot be read, or the TOML content is invalid.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_or_create(&path)
    }

    /// Load from a specific path, or create a default config file if missing
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML content is invalid,
    /// or the default config file cannot be written.
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from(path)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Load from a specific path
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the TOML content is invalid.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).context("Failed to read config file")?;
        toml::from_str(&content).context("Failed to parse config file")
    }

    /// Save config to a specific path, creating parent directories if needed
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created,
    /// serialization fails, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content).context("Failed to write config file")?;
        Ok(())
    }

    /// Build the detection rule set from the `[[detection.rules]]` table.
    ///
    /// # Errors
    ///
    /// Returns an error if a rule is malformed or two rules share an id.
    pub fn rule_set(&self) -> Result<RuleSet> {
        RuleSet::new(self.detection.rules.clone()).context("Invalid detection rules")
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(config_dir.join("epiwatch").join("config.toml"))
    }
}

/// Non-finite thresholds fall back to the built-in default.
fn finite_or(value: f64, default: f64, name: &str) -> f64 {
    if value.is_finite() {
        value
    } else {
        tracing::warn!("escalation.{name} is not a finite number, using {default}");
        default
    }
}

impl From<&EscalationConfig> for EscalationThresholds {
    fn from(config: &EscalationConfig) -> Self {
        let vector_rainfall_mm = finite_or(
            config.vector_rainfall_mm,
            default_vector_rainfall(),
            "vector_rainfall_mm",
        );
        let vector_temperature_c = finite_or(
            config.vector_temperature_c,
            default_vector_temperature(),
            "vector_temperature_c",
        );
        let flood_rainfall_mm = finite_or(
            config.flood_rainfall_mm,
            default_flood_rainfall(),
            "flood_rainfall_mm",
        );
        let outbreak_min_confidence = finite_or(
            config.outbreak_min_confidence,
            default_outbreak_confidence(),
            "outbreak_min_confidence",
        );

        // Percentages and confidence are clamped to their valid ranges
        let vector_humidity_percent = finite_or(
            config.vector_humidity_percent,
            default_vector_humidity(),
            "vector_humidity_percent",
        )
        .clamp(0.0, 100.0);
        let vector_high_humidity_percent = finite_or(
            config.vector_high_humidity_percent,
            default_vector_high_humidity(),
            "vector_high_humidity_percent",
        )
        .clamp(0.0, 100.0)
        .max(vector_humidity_percent);

        Self {
            vector_rainfall_mm: vector_rainfall_mm.max(0.0),
            vector_humidity_percent,
            vector_temperature_c,
            vector_high_humidity_percent,
            flood_rainfall_mm: flood_rainfall_mm.max(0.0),
            outbreak_min_confidence: outbreak_min_confidence.clamp(0.0, 1.0),
            outbreak_min_reports: config.outbreak_min_reports,
        }
    }
}
