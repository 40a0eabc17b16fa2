//! Configuration for the lexicon, emoji table and model source

use crate::emoji::{EmojiScorer, DEFAULT_EMOJI_WEIGHTS};
use crate::lexicon::{Lexicon, TermPolarity, DEFAULT_NEGATIVE_WORDS, DEFAULT_POSITIVE_WORDS};
use crate::loader::FileModelLoader;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use votesense_core::Result;

/// Configuration for all signal sources
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignalsConfig {
    /// Lexicon word lists
    #[serde(default)]
    pub lexicon: LexiconConfig,

    /// Emoji weight table
    #[serde(default)]
    pub emoji: EmojiConfig,

    /// Classifier weights file
    #[serde(default)]
    pub model: ModelSourceConfig,
}

/// How configured entries combine with the built-in tables
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeMode {
    /// Add to the built-in entries
    #[default]
    Extend,
    /// Use only the configured entries
    Replace,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LexiconConfig {
    #[serde(default)]
    pub mode: MergeMode,

    #[serde(default)]
    pub positive: Vec<String>,

    #[serde(default)]
    pub negative: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmojiConfig {
    #[serde(default)]
    pub mode: MergeMode,

    /// Glyph to weight; an entry for a built-in glyph overrides its weight
    #[serde(default)]
    pub weights: BTreeMap<String, i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSourceConfig {
    /// Path to a YAML or JSON linear model
    #[serde(default = "default_model_path")]
    pub path: PathBuf,
}

impl Default for ModelSourceConfig {
    fn default() -> Self {
        Self {
            path: default_model_path(),
        }
    }
}

fn default_model_path() -> PathBuf {
    PathBuf::from("./models/voter-feedback.yaml")
}

impl SignalsConfig {
    /// Load from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Build the lexicon described by this configuration
    pub fn build_lexicon(&self) -> Lexicon {
        let mut lexicon = match self.lexicon.mode {
            MergeMode::Extend => Lexicon::new(DEFAULT_POSITIVE_WORDS, DEFAULT_NEGATIVE_WORDS),
            MergeMode::Replace => Lexicon::new(Vec::<String>::new(), Vec::<String>::new()),
        };
        lexicon.extend(TermPolarity::Positive, &self.lexicon.positive);
        lexicon.extend(TermPolarity::Negative, &self.lexicon.negative);
        lexicon
    }

    /// Build the emoji scorer described by this configuration
    pub fn build_emoji_scorer(&self) -> Result<EmojiScorer> {
        let mut table: Vec<(String, i32)> = match self.emoji.mode {
            MergeMode::Extend => DEFAULT_EMOJI_WEIGHTS
                .iter()
                .filter(|(glyph, _)| !self.emoji.weights.contains_key(*glyph))
                .map(|(glyph, weight)| (glyph.to_string(), *weight))
                .collect(),
            MergeMode::Replace => Vec::new(),
        };
        table.extend(self.emoji.weights.iter().map(|(g, w)| (g.clone(), *w)));
        EmojiScorer::with_weights(table)
    }

    /// Loader for the configured model file
    pub fn model_loader(&self) -> FileModelLoader {
        FileModelLoader::new(self.model.path.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SignalsConfig::from_yaml("{}").unwrap();
        let lexicon = config.build_lexicon();
        assert!(lexicon.is_positive("secure"));
        assert!(lexicon.is_negative("crash"));
        assert_eq!(
            config.build_emoji_scorer().unwrap().glyph_count(),
            DEFAULT_EMOJI_WEIGHTS.len()
        );
        assert_eq!(config.model.path, PathBuf::from("./models/voter-feedback.yaml"));
    }

    #[test]
    fn test_extend_lexicon() {
        let yaml = r#"
lexicon:
  positive: [verified]
  negative: [queue]
"#;
        let lexicon = SignalsConfig::from_yaml(yaml).unwrap().build_lexicon();
        assert!(lexicon.is_positive("verified"));
        assert!(lexicon.is_positive("good"));
        assert!(lexicon.is_negative("queue"));
    }

    #[test]
    fn test_replace_lexicon() {
        let yaml = r#"
lexicon:
  mode: replace
  positive: [verified]
"#;
        let lexicon = SignalsConfig::from_yaml(yaml).unwrap().build_lexicon();
        assert!(lexicon.is_positive("verified"));
        assert!(!lexicon.is_positive("good"));
        assert_eq!(lexicon.len(), (1, 0));
    }

    #[test]
    fn test_emoji_override() {
        let yaml = "emoji:\n  weights:\n    \"👍\": 1\n    \"🗳\": 1\n";
        let scorer = SignalsConfig::from_yaml(yaml)
            .unwrap()
            .build_emoji_scorer()
            .unwrap();
        assert_eq!(scorer.glyph_count(), DEFAULT_EMOJI_WEIGHTS.len() + 1);
        assert_eq!(scorer.scan("👍🗳").score, 2);
    }
}
