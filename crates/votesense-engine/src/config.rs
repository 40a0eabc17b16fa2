//! Fusion weights and decision thresholds

use serde::{Deserialize, Serialize};
use votesense_core::{Error, Result};

/// Engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub weights: FusionWeights,

    #[serde(default)]
    pub thresholds: Thresholds,
}

impl EngineConfig {
    /// Load from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.weights.validate()?;
        self.thresholds.validate()
    }
}

/// Base weight of each signal before normalization
///
/// A source that produced evidence gets its `*_active` weight, otherwise its
/// `*_idle` weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FusionWeights {
    #[serde(default = "default_classifier")]
    pub classifier: f64,

    #[serde(default = "default_lexicon_active")]
    pub lexicon_active: f64,

    #[serde(default = "default_lexicon_idle")]
    pub lexicon_idle: f64,

    #[serde(default = "default_emoji_active")]
    pub emoji_active: f64,

    #[serde(default = "default_emoji_idle")]
    pub emoji_idle: f64,
}

impl Default for FusionWeights {
    fn default() -> Self {
        Self {
            classifier: default_classifier(),
            lexicon_active: default_lexicon_active(),
            lexicon_idle: default_lexicon_idle(),
            emoji_active: default_emoji_active(),
            emoji_idle: default_emoji_idle(),
        }
    }
}

impl FusionWeights {
    pub fn validate(&self) -> Result<()> {
        let all = [
            ("classifier", self.classifier),
            ("lexicon_active", self.lexicon_active),
            ("lexicon_idle", self.lexicon_idle),
            ("emoji_active", self.emoji_active),
            ("emoji_idle", self.emoji_idle),
        ];

        if let Some((name, value)) = all.iter().find(|(_, w)| !w.is_finite() || *w < 0.0) {
            return Err(Error::config(format!(
                "fusion weight '{name}' must be a non-negative number, got {value}"
            )));
        }

        // The classifier always fires, so it alone keeps the total positive.
        if self.classifier <= 0.0 {
            return Err(Error::config("classifier weight must be positive"));
        }

        Ok(())
    }
}

fn default_classifier() -> f64 {
    0.5
}

fn default_lexicon_active() -> f64 {
    0.3
}

fn default_lexicon_idle() -> f64 {
    0.1
}

fn default_emoji_active() -> f64 {
    0.2
}

fn default_emoji_idle() -> f64 {
    0.0
}

/// Ensemble score cut-offs on the 0..=2 scale, both exclusive
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Scores strictly below this are negative
    #[serde(default = "default_negative_below")]
    pub negative_below: f64,

    /// Scores strictly above this are positive
    #[serde(default = "default_positive_above")]
    pub positive_above: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            negative_below: default_negative_below(),
            positive_above: default_positive_above(),
        }
    }
}

impl Thresholds {
    pub fn validate(&self) -> Result<()> {
        if !self.negative_below.is_finite() || !self.positive_above.is_finite() {
            return Err(Error::config("thresholds must be finite"));
        }
        if self.negative_below > self.positive_above {
            return Err(Error::config(format!(
                "negative_below ({}) must not exceed positive_above ({})",
                self.negative_below, self.positive_above
            )));
        }
        Ok(())
    }
}

fn default_negative_below() -> f64 {
    0.8
}

fn default_positive_above() -> f64 {
    1.2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_yaml() {
        let config = EngineConfig::from_yaml("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.weights.classifier, 0.5);
        assert_eq!(config.thresholds.negative_below, 0.8);
        assert_eq!(config.thresholds.positive_above, 1.2);
    }

    #[test]
    fn test_partial_override() {
        let config = EngineConfig::from_yaml("weights:\n  emoji_active: 0.4\n").unwrap();
        assert_eq!(config.weights.emoji_active, 0.4);
        assert_eq!(config.weights.lexicon_active, 0.3);
    }

    #[test]
    fn test_rejects_negative_weight() {
        assert!(EngineConfig::from_yaml("weights:\n  lexicon_idle: -0.1\n").is_err());
        assert!(EngineConfig::from_yaml("weights:\n  classifier: 0.0\n").is_err());
    }

    #[test]
    fn test_rejects_inverted_thresholds() {
        let yaml = "thresholds:\n  negative_below: 1.5\n  positive_above: 1.0\n";
        assert!(EngineConfig::from_yaml(yaml).is_err());
    }
}
