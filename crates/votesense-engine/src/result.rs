//! Per-text analysis result

use crate::fusion::PerSignal;
use crate::key_terms::KeyTerms;
use serde::{Deserialize, Serialize};
use votesense_core::{ClassProbabilities, SentimentLabel, SignalReading};

/// Outcome of analyzing one text; immutable once built
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Text exactly as submitted
    pub original_text: String,

    /// Ensemble label
    pub sentiment: SentimentLabel,

    /// Confidence in [0, 1]
    pub confidence: f64,

    /// Classifier probabilities
    pub class_probabilities: ClassProbabilities,

    /// Lexicon words that appeared, at most five per side
    pub key_terms: KeyTerms,

    /// Diagnostic breakdown
    pub debug: AnalysisDebug,
}

/// Fixed-shape diagnostics for one analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisDebug {
    /// Classifier's own label
    pub classifier_label: SentimentLabel,

    /// Name of the classifier that produced the prediction
    pub classifier_name: String,

    /// Lexicon score in [-1, 1]
    pub lexicon_score: f64,

    /// Summed emoji weight
    pub emoji_score: i32,

    /// Signal values on the 0..=2 scale
    pub adjusted_values: PerSignal,

    /// Normalized fusion weights
    pub weights: PerSignal,

    /// Weighted contribution of each signal to the ensemble score
    pub contributions: PerSignal,

    /// Weighted score on the 0..=2 scale
    pub ensemble_score: f64,

    /// Agreement factor in [0, 1]
    pub agreement_factor: f64,

    /// Labels that took part in the agreement count
    pub readings: Vec<SignalReading>,
}
