//! Weighted fusion of classifier, lexicon and emoji signals
//!
//! Every signal is first placed on a common 0..=2 scale (0 negative, 1
//! neutral, 2 positive). Base weights depend on whether a source produced any
//! evidence, are normalized to sum to one, and the weighted sum is mapped
//! onto a label with asymmetric, exclusive thresholds.

use crate::config::{FusionWeights, Thresholds};
use serde::{Deserialize, Serialize};
use votesense_core::{Result, SentimentLabel, SignalSource};
use votesense_signals::ModelPrediction;

/// One value per signal source
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PerSignal {
    pub classifier: f64,
    pub lexicon: f64,
    pub emoji: f64,
}

impl PerSignal {
    pub fn get(&self, source: SignalSource) -> f64 {
        match source {
            SignalSource::Classifier => self.classifier,
            SignalSource::Lexicon => self.lexicon,
            SignalSource::Emoji => self.emoji,
        }
    }

    pub fn sum(&self) -> f64 {
        self.classifier + self.lexicon + self.emoji
    }
}

/// Everything the fusion step computed for one text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FusionOutcome {
    /// Ensemble label
    pub label: SentimentLabel,

    /// Weighted score on the 0..=2 scale
    pub ensemble_score: f64,

    /// Signal values on the 0..=2 scale
    pub values: PerSignal,

    /// Normalized weights, summing to 1
    pub weights: PerSignal,

    /// `weights[i] * values[i]`
    pub contributions: PerSignal,
}

/// Map a lexicon score in [-1, 1] onto [0, 2]
pub fn lexicon_adjusted(lexicon_score: f64) -> f64 {
    lexicon_score + 1.0
}

/// Map an emoji score onto [0, 2], saturating at 3 points either way
pub fn emoji_adjusted(emoji_score: i32) -> f64 {
    let shifted = 1.0 + f64::from(emoji_score) / 3.0;
    match emoji_score {
        s if s > 0 => shifted.min(2.0),
        s if s < 0 => shifted.max(0.0),
        _ => 1.0,
    }
}

impl Thresholds {
    /// Label for an ensemble score; both boundaries resolve to neutral
    pub fn label_for(&self, ensemble_score: f64) -> SentimentLabel {
        if ensemble_score < self.negative_below {
            SentimentLabel::Negative
        } else if ensemble_score > self.positive_above {
            SentimentLabel::Positive
        } else {
            SentimentLabel::Neutral
        }
    }
}

impl FusionWeights {
    /// Base weights for the evidence actually present, normalized to sum to 1
    pub fn normalized(&self, lexicon_fired: bool, emoji_fired: bool) -> PerSignal {
        let base = PerSignal {
            classifier: self.classifier,
            lexicon: if lexicon_fired {
                self.lexicon_active
            } else {
                self.lexicon_idle
            },
            emoji: if emoji_fired {
                self.emoji_active
            } else {
                self.emoji_idle
            },
        };

        let total = base.sum();
        PerSignal {
            classifier: base.classifier / total,
            lexicon: base.lexicon / total,
            emoji: base.emoji / total,
        }
    }
}

/// Combines three heterogeneous signals into one label
#[derive(Debug, Clone, Default)]
pub struct FusionEngine {
    weights: FusionWeights,
    thresholds: Thresholds,
}

impl FusionEngine {
    /// Create an engine; rejects negative weights and inverted thresholds
    pub fn new(weights: FusionWeights, thresholds: Thresholds) -> Result<Self> {
        weights.validate()?;
        thresholds.validate()?;
        Ok(Self {
            weights,
            thresholds,
        })
    }

    /// Fuse a validated classifier prediction with lexicon and emoji scores
    pub fn fuse(
        &self,
        prediction: &ModelPrediction,
        lexicon_score: f64,
        emoji_score: i32,
    ) -> FusionOutcome {
        let values = PerSignal {
            classifier: prediction.label.index() as f64,
            lexicon: lexicon_adjusted(lexicon_score),
            emoji: emoji_adjusted(emoji_score),
        };

        let weights = self
            .weights
            .normalized(lexicon_score != 0.0, emoji_score != 0);

        let contributions = PerSignal {
            classifier: weights.classifier * values.classifier,
            lexicon: weights.lexicon * values.lexicon,
            emoji: weights.emoji * values.emoji,
        };

        let ensemble_score = contributions.sum();

        FusionOutcome {
            label: self.thresholds.label_for(ensemble_score),
            ensemble_score,
            values,
            weights,
            contributions,
        }
    }
}
