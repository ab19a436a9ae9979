pub mod respiratory;
pub mod viral;
pub mod waterborne;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::entities::counts::SymptomCounts;
use crate::domain::value_objects::symptom::Symptom;

/// Hard ceiling on any cluster confidence.
pub const MAX_CONFIDENCE: f64 = 0.95;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RuleError {
    #[error("rule id must not be empty")]
    EmptyId,
    #[error("duplicate rule id: {0}")]
    DuplicateId(String),
    #[error("rule {0} watches no symptom")]
    NoSymptoms(String),
    #[error("rule {0} needs a positive confidence scale")]
    InvalidScale(String),
    #[error("rule {0} has a non-finite confidence bound")]
    InvalidConfidence(String),
}

/// A detection rule: fires when the summed counts of `symptoms` reach
/// `min_count` for one location.
///
/// Confidence grows linearly with the excess over the threshold:
/// `base_confidence + (sum - min_count) / scale`, capped at
/// `max_confidence` (never above [`MAX_CONFIDENCE`]) and rounded to two
/// decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutbreakRule {
    pub id: String,
    pub label: String,
    pub symptoms: Vec<Symptom>,
    pub min_count: u32,
    #[serde(default = "default_base_confidence")]
    pub base_confidence: f64,
    pub scale: f64,
    #[serde(default = "default_max_confidence")]
    pub max_confidence: f64,
    #[serde(default)]
    pub actions: Vec<String>,
}

const fn default_base_confidence() -> f64 {
    0.5
}

const fn default_max_confidence() -> f64 {
    MAX_CONFIDENCE
}

impl OutbreakRule {
    /// Summed count of the watched symptoms.
    #[must_use]
    pub fn observed(&self, counts: &SymptomCounts) -> u32 {
        counts.sum_of(&self.symptoms)
    }

    #[must_use]
    pub fn triggers(&self, counts: &SymptomCounts) -> bool {
        self.observed(counts) >= self.min_count
    }

    #[must_use]
    pub fn confidence(&self, counts: &SymptomCounts) -> f64 {
        let excess = f64::from(self.observed(counts).saturating_sub(self.min_count));
        let ceiling = self.max_confidence.clamp(0.0, MAX_CONFIDENCE);
        let raw = self.base_confidence + excess / self.scale;
        round2(raw.clamp(0.0, ceiling))
    }

    fn validate(&self) -> Result<(), RuleError> {
        if self.id.trim().is_empty() {
            return Err(RuleError::EmptyId);
        }
        if self.symptoms.is_empty() {
            return Err(RuleError::NoSymptoms(self.id.clone()));
        }
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(RuleError::InvalidScale(self.id.clone()));
        }
        if !(self.base_confidence.is_finite() && self.max_confidence.is_finite()) {
            return Err(RuleError::InvalidConfidence(self.id.clone()));
        }
        Ok(())
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// A rule that matched one location's counts.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleMatch<'a> {
    pub rule: &'a OutbreakRule,
    pub confidence: f64,
}

/// Immutable, ordered set of detection rules.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSet {
    rules: Vec<OutbreakRule>,
}

impl RuleSet {
    /// Builds a rule set, rejecting malformed rules and duplicate ids.
    ///
    /// # Errors
    ///
    /// Returns `RuleError` for the first invalid rule found.
    pub fn new(rules: Vec<OutbreakRule>) -> Result<Self, RuleError> {
        let mut seen = HashSet::new();
        for rule in &rules {
            rule.validate()?;
            if !seen.insert(rule.id.as_str()) {
                return Err(RuleError::DuplicateId(rule.id.clone()));
            }
        }
        Ok(Self { rules })
    }

    #[must_use]
    pub fn rules(&self) -> &[OutbreakRule] {
        &self.rules
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Evaluates every rule independently, in rule order.
    #[must_use]
    pub fn evaluate(&self, counts: &SymptomCounts) -> Vec<RuleMatch<'_>> {
        self.rules
            .iter()
            .filter(|rule| rule.triggers(counts))
            .map(|rule| RuleMatch {
                rule,
                confidence: rule.confidence(counts),
            })
            .collect()
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            rules: default_rules(),
        }
    }
}

/// Returns the built-in detection rules in evaluation order.
#[must_use]
pub fn default_rules() -> Vec<OutbreakRule> {
    vec![
        viral::viral_rule(),
        waterborne::waterborne_rule(),
        respiratory::respiratory_rule(),
    ]
}
