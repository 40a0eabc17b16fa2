//! Classifier trait and prediction types

use votesense_core::{ClassProbabilities, Error, Result, SentimentLabel};

/// Allowed deviation of a probability vector's total from 1.0
pub const PROBABILITY_TOLERANCE: f64 = 1e-6;

/// Trait for pre-trained three-way sentiment classifiers
///
/// Implementations must be deterministic for fixed weights and must never
/// retrain as a side effect of inference.
pub trait Classifier: Send + Sync {
    /// Predict a label index and class probabilities for cleaned text
    fn predict(&self, text: &str) -> Result<RawPrediction>;

    /// Get the classifier name
    fn name(&self) -> &str;
}

/// Unchecked classifier output, exactly as the model produced it
#[derive(Debug, Clone, PartialEq)]
pub struct RawPrediction {
    /// Label index, expected in 0..=2 (negative, neutral, positive)
    pub label_index: i64,

    /// Class probabilities ordered negative, neutral, positive
    pub probabilities: Vec<f64>,
}

impl RawPrediction {
    pub fn new(label_index: i64, probabilities: impl Into<Vec<f64>>) -> Self {
        Self {
            label_index,
            probabilities: probabilities.into(),
        }
    }
}

/// Classifier output that satisfied the label/probability contract
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelPrediction {
    /// Predicted label
    pub label: SentimentLabel,

    /// Probability per class
    pub probabilities: ClassProbabilities,
}

impl ModelPrediction {
    /// Check a raw prediction against the contract
    ///
    /// Out-of-range labels, vectors not of length 3, non-finite or negative
    /// entries and totals away from 1.0 are rejected, never coerced.
    pub fn validate(raw: RawPrediction) -> Result<Self> {
        let label = SentimentLabel::from_index(raw.label_index).ok_or_else(|| {
            Error::invalid_model_output(format!(
                "label index {} is outside 0..=2",
                raw.label_index
            ))
        })?;

        let values: [f64; 3] = raw.probabilities.as_slice().try_into().map_err(|_| {
            Error::invalid_model_output(format!(
                "expected 3 class probabilities, got {}",
                raw.probabilities.len()
            ))
        })?;

        if let Some(bad) = values.iter().find(|p| !p.is_finite() || **p < 0.0) {
            return Err(Error::invalid_model_output(format!(
                "probability {bad} is not a finite non-negative number"
            )));
        }

        let total: f64 = values.iter().sum();
        if (total - 1.0).abs() > PROBABILITY_TOLERANCE {
            return Err(Error::invalid_model_output(format!(
                "class probabilities sum to {total}, expected 1.0"
            )));
        }

        Ok(Self {
            label,
            probabilities: ClassProbabilities::from_array(values),
        })
    }

    /// Classifier certainty: the highest class probability
    pub fn confidence(&self) -> f64 {
        self.probabilities.max()
    }
}

/// Run a classifier and validate what it returns
pub fn predict_checked(classifier: &dyn Classifier, text: &str) -> Result<ModelPrediction> {
    let raw = classifier.predict(text)?;
    ModelPrediction::validate(raw).map_err(|e| {
        tracing::warn!(classifier = classifier.name(), error = %e, "Rejected classifier output");
        e
    })
}
