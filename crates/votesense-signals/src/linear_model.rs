//! Pre-trained bag-of-n-grams linear classifier
//!
//! Weights are produced offline and shipped as a YAML or JSON file. Inference
//! sums the bias and the weight row of every n-gram present in the cleaned
//! text, then applies a softmax over the three classes.

use crate::classifier::{Classifier, RawPrediction};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use votesense_core::{Error, Result};

/// On-disk model definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModelSpec {
    /// Model name, reported in logs and results
    pub name: String,

    /// Longest n-gram used as a feature
    #[serde(default = "default_ngram_max")]
    pub ngram_max: usize,

    /// Per-class intercept ordered negative, neutral, positive
    pub bias: [f64; 3],

    /// Per-feature weight rows ordered negative, neutral, positive
    #[serde(default)]
    pub weights: HashMap<String, [f64; 3]>,
}

fn default_ngram_max() -> usize {
    1
}

impl LinearModelSpec {
    /// Parse a model definition, picking the format from the file extension
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content, path)
    }

    /// Parse a model definition already read into memory
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(serde_json::from_str(content)?),
            Some("yaml") | Some("yml") => Ok(serde_yaml::from_str(content)?),
            other => Err(Error::config(format!(
                "unsupported model file extension {:?} for {}",
                other,
                path.display()
            ))),
        }
    }
}

/// Linear softmax classifier over unigram..n-gram features
#[derive(Debug, Clone)]
pub struct LinearModel {
    name: String,
    ngram_max: usize,
    bias: [f64; 3],
    weights: HashMap<String, [f64; 3]>,
}

impl LinearModel {
    /// Build a model from a parsed definition
    pub fn from_spec(spec: LinearModelSpec) -> Result<Self> {
        if spec.ngram_max == 0 {
            return Err(Error::config("ngram_max must be at least 1"));
        }

        if spec.bias.iter().any(|b| !b.is_finite()) {
            return Err(Error::config(format!("model '{}' has a non-finite bias", spec.name)));
        }

        if let Some((feature, _)) = spec
            .weights
            .iter()
            .find(|(_, row)| row.iter().any(|w| !w.is_finite()))
        {
            return Err(Error::config(format!(
                "model '{}' has a non-finite weight for '{}'",
                spec.name, feature
            )));
        }

        Ok(Self {
            name: spec.name,
            ngram_max: spec.ngram_max,
            bias: spec.bias,
            weights: spec.weights,
        })
    }

    /// Load a model from a YAML or JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_spec(LinearModelSpec::from_file(path)?)
    }

    /// Number of weighted features
    pub fn feature_count(&self) -> usize {
        self.weights.len()
    }

    fn logits(&self, text: &str) -> [f64; 3] {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        let mut logits = self.bias;

        for n in 1..=self.ngram_max.min(tokens.len()) {
            for window in tokens.windows(n) {
                let feature = window.join(" ");
                if let Some(row) = self.weights.get(&feature) {
                    for (logit, w) in logits.iter_mut().zip(row) {
                        *logit += w;
                    }
                }
            }
        }

        logits
    }
}

impl Classifier for LinearModel {
    fn predict(&self, text: &str) -> Result<RawPrediction> {
        let probabilities = softmax(self.logits(text));
        Ok(RawPrediction::new(argmax(&probabilities) as i64, probabilities.to_vec()))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

fn softmax(logits: [f64; 3]) -> [f64; 3] {
    let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exp = logits.map(|l| (l - max).exp());
    let total: f64 = exp.iter().sum();
    exp.map(|e| e / total)
}

/// Index of the largest value, lowest index on ties
fn argmax(values: &[f64; 3]) -> usize {
    let mut best = 0;
    for (i, v) in values.iter().enumerate().skip(1) {
        if *v > values[best] {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::ModelPrediction;
    use votesense_core::SentimentLabel;

    fn spec() -> LinearModelSpec {
        let yaml = r#"
name: test-model
ngram_max: 2
bias: [0.0, 0.1, 0.0]
weights:
  secure: [-0.5, -0.2, 1.2]
  crash: [1.5, -0.3, -0.8]
  "not secure": [2.0, 0.0, -2.0]
"#;
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_predict_positive() {
        let model = LinearModel::from_spec(spec()).unwrap();
        let prediction = ModelPrediction::validate(model.predict("vote secure").unwrap()).unwrap();
        assert_eq!(prediction.label, SentimentLabel::Positive);
    }

    #[test]
    fn test_bigram_features() {
        let model = LinearModel::from_spec(spec()).unwrap();
        let prediction = ModelPrediction::validate(model.predict("not secure").unwrap()).unwrap();
        assert_eq!(prediction.label, SentimentLabel::Negative);
    }

    #[test]
    fn test_empty_text_uses_bias() {
        let model = LinearModel::from_spec(spec()).unwrap();
        let raw = model.predict("").unwrap();
        assert_eq!(raw.label_index, 1);
        let total: f64 = raw.probabilities.iter().sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_argmax_prefers_lowest_index_on_ties() {
        assert_eq!(argmax(&[0.4, 0.4, 0.2]), 0);
        assert_eq!(argmax(&[0.2, 0.4, 0.4]), 1);
    }

    #[test]
    fn test_rejects_zero_ngram() {
        let mut bad = spec();
        bad.ngram_max = 0;
        assert!(LinearModel::from_spec(bad).is_err());
    }

    #[test]
    fn test_wrong_row_length_fails_to_parse() {
        let yaml = "name: bad\nbias: [0.0, 0.0]\n";
        assert!(serde_yaml::from_str::<LinearModelSpec>(yaml).is_err());
    }

    #[test]
    fn test_unknown_extension() {
        let err = LinearModelSpec::parse("{}", Path::new("model.bin")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
