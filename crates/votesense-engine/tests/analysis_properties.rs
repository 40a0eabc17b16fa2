//! Property tests for the analysis invariants
//!
//! Run with: cargo test -p votesense-engine --test analysis_properties

use proptest::prelude::*;
use std::sync::Arc;
use votesense_core::{Result, SentimentLabel};
use votesense_engine::fusion::{emoji_adjusted, lexicon_adjusted};
use votesense_engine::{SentimentAnalyzer, StatisticsAggregator, Thresholds};
use votesense_signals::{Classifier, LexiconScorer, RawPrediction};

/// Derives a valid distribution from the text bytes
struct ChecksumClassifier;

impl Classifier for ChecksumClassifier {
    fn predict(&self, text: &str) -> Result<RawPrediction> {
        let mut raw = [1.0f64; 3];
        for (i, byte) in text.bytes().enumerate() {
            raw[i % 3] += f64::from(byte % 17);
        }
        let total: f64 = raw.iter().sum();
        let probabilities: Vec<f64> = raw.iter().map(|v| v / total).collect();

        let label = probabilities
            .iter()
            .enumerate()
            .fold(0, |best, (i, p)| if *p > probabilities[best] { i } else { best });

        Ok(RawPrediction::new(label as i64, probabilities))
    }

    fn name(&self) -> &str {
        "checksum"
    }
}

fn analyzer() -> SentimentAnalyzer {
    SentimentAnalyzer::new(Arc::new(ChecksumClassifier)).unwrap()
}

fn feedback_text() -> impl Strategy<Value = String> {
    let words = prop::sample::select(vec![
        "good", "bad", "secure", "slow", "vote", "ballot", "love", "hate", "the", "was",
        "👍", "👎", "😡", "❤️", "!", "?", "fast", "bug", "ok", "blockchain",
    ]);
    prop::collection::vec(words, 1..24).prop_map(|w| w.join(" "))
}

proptest! {
    #[test]
    fn prop_result_invariants(text in feedback_text()) {
        let result = analyzer().analyze_text(&text).unwrap();

        prop_assert!((0.0..=1.0).contains(&result.confidence));
        prop_assert!((result.class_probabilities.sum() - 1.0).abs() <= 1e-6);
        prop_assert!(SentimentLabel::ALL.contains(&result.sentiment));
        prop_assert!((-1.0..=1.0).contains(&result.debug.lexicon_score));
        prop_assert!((-1e-9..=2.0 + 1e-9).contains(&result.debug.ensemble_score));
        prop_assert!((result.debug.weights.sum() - 1.0).abs() < 1e-9);
        prop_assert!(result.key_terms.positive.len() <= 5);
        prop_assert!(result.key_terms.negative.len() <= 5);
        prop_assert_eq!(result.original_text, text);
    }

    #[test]
    fn prop_analysis_is_deterministic(text in feedback_text()) {
        let analyzer = analyzer();
        prop_assert_eq!(analyzer.analyze_text(&text).unwrap(), analyzer.analyze_text(&text).unwrap());
    }

    #[test]
    fn prop_arbitrary_text_never_panics(text in "\\PC{1,80}") {
        if let Ok(result) = analyzer().analyze_text(&text) {
            prop_assert!((0.0..=1.0).contains(&result.confidence));
        }
    }

    #[test]
    fn prop_lexicon_score_bounded(tokens in prop::collection::vec("[a-z]{1,10}", 0..40)) {
        let score = LexiconScorer::default().score(&tokens);
        prop_assert!((-1.0..=1.0).contains(&score));
    }

    #[test]
    fn prop_batch_percentages_sum_to_hundred(texts in prop::collection::vec(feedback_text(), 1..20)) {
        let batch = analyzer().analyze_batch(&texts).unwrap();
        let stats = &batch.statistics;
        let total: f64 = SentimentLabel::ALL.iter().map(|l| stats.distribution.get(*l).percentage).sum();

        prop_assert_eq!(stats.total, texts.len());
        prop_assert!((total - 100.0).abs() <= 0.15);
        prop_assert!((-1.0..=1.0).contains(&stats.overall_sentiment_score));
    }
}

#[test]
fn test_all_positive_tokens_saturate_lexicon() {
    let score = LexiconScorer::default().score(&["good", "good", "good"]);
    assert_eq!(score, 1.0);
    assert_eq!(lexicon_adjusted(score), 2.0);
}

#[test]
fn test_double_thumbs_up_saturates_emoji() {
    let result = analyzer().analyze_text("👍👍").unwrap();
    assert_eq!(result.debug.emoji_score, 4);
    assert_eq!(emoji_adjusted(4), 2.0);
    assert_eq!(result.debug.adjusted_values.emoji, 2.0);
}

#[test]
fn test_full_agreement_and_full_disagreement() {
    struct Fixed(i64, [f64; 3]);
    impl Classifier for Fixed {
        fn predict(&self, _text: &str) -> Result<RawPrediction> {
            Ok(RawPrediction::new(self.0, self.1.to_vec()))
        }
        fn name(&self) -> &str {
            "fixed"
        }
    }

    let positive = SentimentAnalyzer::new(Arc::new(Fixed(2, [0.1, 0.1, 0.8]))).unwrap();
    let result = positive.analyze_text("great secure voting 👍").unwrap();
    assert_eq!(result.debug.agreement_factor, 1.0);

    // classifier neutral, lexicon positive, emoji negative
    let neutral = SentimentAnalyzer::new(Arc::new(Fixed(1, [0.2, 0.6, 0.2]))).unwrap();
    let result = neutral.analyze_text("great secure voting 👎").unwrap();
    assert_eq!(result.debug.agreement_factor, 0.0);
    assert!((result.confidence - 0.7 * 0.6).abs() < 1e-12);
}

#[test]
fn test_threshold_boundaries_are_neutral() {
    let thresholds = Thresholds::default();
    assert_eq!(thresholds.label_for(0.8), SentimentLabel::Neutral);
    assert_eq!(thresholds.label_for(1.2), SentimentLabel::Neutral);
    assert_eq!(thresholds.label_for(0.799), SentimentLabel::Negative);
    assert_eq!(thresholds.label_for(1.201), SentimentLabel::Positive);
}

#[test]
fn test_empty_batch_statistics_are_zero() {
    let stats = StatisticsAggregator::default().aggregate(&[]);
    assert_eq!(stats.total, 0);
    assert_eq!(stats.overall_sentiment_score, 0.0);
    assert_eq!(stats.average_confidence, 0.0);
    for label in SentimentLabel::ALL {
        assert_eq!(stats.distribution.get(label).percentage, 0.0);
    }
}

#[test]
fn test_batch_serializes_with_lowercase_labels() {
    let batch = analyzer().analyze_batch(&["love it 😊", "so slow 😞"]).unwrap();
    let json = serde_json::to_value(&batch).unwrap();
    let label = json["results"][0]["sentiment"].as_str().unwrap();
    assert!(["negative", "neutral", "positive"].contains(&label));
    assert!(json["statistics"]["distribution"]["positive"]["count"].is_u64());
}
