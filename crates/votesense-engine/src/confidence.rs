//! Confidence from classifier certainty and cross-signal agreement

use std::collections::HashSet;
use votesense_core::{SentimentLabel, SignalReading, SignalSource};
use votesense_signals::ModelPrediction;

/// Share of the confidence taken from classifier certainty
pub const CLASSIFIER_SHARE: f64 = 0.7;

/// Share of the confidence taken from agreement
pub const AGREEMENT_SHARE: f64 = 0.3;

/// Lexicon scores beyond this magnitude get a polar label
pub const LEXICON_LABEL_BAND: f64 = 0.2;

/// Emoji scores beyond this magnitude get a polar label
pub const EMOJI_LABEL_BAND: i32 = 1;

/// Confidence computation for one text
#[derive(Debug, Clone, PartialEq)]
pub struct ConfidenceOutcome {
    /// Final confidence in [0, 1]
    pub confidence: f64,

    /// Highest classifier probability
    pub classifier_confidence: f64,

    /// 1.0 for full agreement, 0.5 for two labels, 0.0 for three
    pub agreement_factor: f64,

    /// Number of distinct labels among the emitted ones
    pub distinct_labels: usize,

    /// Readings that took part in the agreement count
    pub readings: Vec<SignalReading>,
}

/// Lexicon label: polar outside ±0.2, neutral otherwise
pub fn lexicon_label(lexicon_score: f64) -> SentimentLabel {
    if lexicon_score < -LEXICON_LABEL_BAND {
        SentimentLabel::Negative
    } else if lexicon_score > LEXICON_LABEL_BAND {
        SentimentLabel::Positive
    } else {
        SentimentLabel::Neutral
    }
}

/// Emoji label: polar outside ±1, neutral for other nonzero scores, none at 0
pub fn emoji_label(emoji_score: i32) -> Option<SentimentLabel> {
    if emoji_score < -EMOJI_LABEL_BAND {
        Some(SentimentLabel::Negative)
    } else if emoji_score > EMOJI_LABEL_BAND {
        Some(SentimentLabel::Positive)
    } else if emoji_score != 0 {
        Some(SentimentLabel::Neutral)
    } else {
        None
    }
}

/// Map a distinct-label count (1..=3) onto 1.0, 0.5, 0.0
pub fn agreement_factor(distinct_labels: usize) -> f64 {
    let distinct = distinct_labels.clamp(1, 3) as f64;
    1.0 - (distinct - 1.0) / 2.0
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ConfidenceEstimator;

impl ConfidenceEstimator {
    pub fn new() -> Self {
        Self
    }

    /// Blend classifier certainty with how many distinct labels the sources
    /// emitted
    ///
    /// The emoji source only votes when its score is nonzero, so agreement
    /// is counted over two or three labels.
    pub fn estimate(
        &self,
        prediction: &ModelPrediction,
        lexicon_score: f64,
        emoji_score: i32,
    ) -> ConfidenceOutcome {
        let classifier_confidence = prediction.confidence();

        let mut readings = vec![
            SignalReading::labelled(
                SignalSource::Classifier,
                prediction.label.index() as f64,
                prediction.label,
            ),
            SignalReading::labelled(
                SignalSource::Lexicon,
                lexicon_score,
                lexicon_label(lexicon_score),
            ),
        ];
        if let Some(label) = emoji_label(emoji_score) {
            readings.push(SignalReading::labelled(
                SignalSource::Emoji,
                f64::from(emoji_score),
                label,
            ));
        }

        let distinct_labels = readings
            .iter()
            .filter_map(|r| r.label)
            .collect::<HashSet<_>>()
            .len();
        let agreement_factor = agreement_factor(distinct_labels);

        let confidence = (CLASSIFIER_SHARE * classifier_confidence
            + AGREEMENT_SHARE * agreement_factor)
            .clamp(0.0, 1.0);

        ConfidenceOutcome {
            confidence,
            classifier_confidence,
            agreement_factor,
            distinct_labels,
            readings,
        }
    }
}
