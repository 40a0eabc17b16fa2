//! Core types for VoteSense

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Three-way sentiment label
///
/// Ordered for scoring purposes as negative (0) < neutral (1) < positive (2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Negative,
    Neutral,
    Positive,
}

impl SentimentLabel {
    /// All labels in index order
    pub const ALL: [SentimentLabel; 3] = [Self::Negative, Self::Neutral, Self::Positive];

    /// Map a classifier label index onto a label
    pub fn from_index(index: i64) -> Option<Self> {
        match index {
            0 => Some(Self::Negative),
            1 => Some(Self::Neutral),
            2 => Some(Self::Positive),
            _ => None,
        }
    }

    /// Position on the 0..=2 scoring scale
    pub fn index(self) -> usize {
        match self {
            Self::Negative => 0,
            Self::Neutral => 1,
            Self::Positive => 2,
        }
    }

    /// Signed polarity used by batch statistics (-1, 0, +1)
    pub fn polarity(self) -> i32 {
        match self {
            Self::Negative => -1,
            Self::Neutral => 0,
            Self::Positive => 1,
        }
    }

    /// Lowercase name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Negative => "negative",
            Self::Neutral => "neutral",
            Self::Positive => "positive",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SentimentLabel {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "negative" => Ok(Self::Negative),
            "neutral" => Ok(Self::Neutral),
            "positive" => Ok(Self::Positive),
            other => Err(crate::Error::invalid_input(format!(
                "unknown sentiment label '{other}'"
            ))),
        }
    }
}

/// Independent evidence source feeding the fusion engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalSource {
    Classifier,
    Lexicon,
    Emoji,
}

impl SignalSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Classifier => "classifier",
            Self::Lexicon => "lexicon",
            Self::Emoji => "emoji",
        }
    }
}

impl fmt::Display for SignalSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One source's opinion about a text
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalReading {
    /// Which source produced the reading
    pub source: SignalSource,

    /// Raw score in the source's own units
    pub raw_score: f64,

    /// Discretized label, when the source emits one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<SentimentLabel>,
}

impl SignalReading {
    /// Create a reading that emits a label
    pub fn labelled(source: SignalSource, raw_score: f64, label: SentimentLabel) -> Self {
        Self {
            source,
            raw_score,
            label: Some(label),
        }
    }
}

/// Probability mass over the three sentiment classes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassProbabilities {
    pub negative: f64,
    pub neutral: f64,
    pub positive: f64,
}

impl ClassProbabilities {
    /// Build from a vector ordered negative, neutral, positive
    pub fn from_array(values: [f64; 3]) -> Self {
        Self {
            negative: values[0],
            neutral: values[1],
            positive: values[2],
        }
    }

    /// Values ordered negative, neutral, positive
    pub fn to_array(self) -> [f64; 3] {
        [self.negative, self.neutral, self.positive]
    }

    /// Probability assigned to a label
    pub fn get(&self, label: SentimentLabel) -> f64 {
        match label {
            SentimentLabel::Negative => self.negative,
            SentimentLabel::Neutral => self.neutral,
            SentimentLabel::Positive => self.positive,
        }
    }

    /// Highest class probability
    pub fn max(&self) -> f64 {
        self.negative.max(self.neutral).max(self.positive)
    }

    /// Total mass
    pub fn sum(&self) -> f64 {
        self.negative + self.neutral + self.positive
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_index_roundtrip() {
        for label in SentimentLabel::ALL {
            assert_eq!(SentimentLabel::from_index(label.index() as i64), Some(label));
        }
        assert_eq!(SentimentLabel::from_index(3), None);
        assert_eq!(SentimentLabel::from_index(-1), None);
    }

    #[test]
    fn test_label_ordering() {
        assert!(SentimentLabel::Negative < SentimentLabel::Neutral);
        assert!(SentimentLabel::Neutral < SentimentLabel::Positive);
    }

    #[test]
    fn test_label_serde_lowercase() {
        let json = serde_json::to_string(&SentimentLabel::Positive).unwrap();
        assert_eq!(json, "\"positive\"");

        let label: SentimentLabel = serde_json::from_str("\"negative\"").unwrap();
        assert_eq!(label, SentimentLabel::Negative);
    }

    #[test]
    fn test_label_from_str() {
        assert_eq!("Neutral".parse::<SentimentLabel>().unwrap(), SentimentLabel::Neutral);
        assert!("mixed".parse::<SentimentLabel>().is_err());
    }

    #[test]
    fn test_probabilities_helpers() {
        let probs = ClassProbabilities::from_array([0.2, 0.3, 0.5]);
        assert_eq!(probs.max(), 0.5);
        assert!((probs.sum() - 1.0).abs() < 1e-12);
        assert_eq!(probs.get(SentimentLabel::Neutral), 0.3);
    }
}
