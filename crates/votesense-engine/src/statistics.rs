//! Batch roll-up of analysis results

use crate::result::AnalysisResult;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use votesense_core::SentimentLabel;

/// Default number of terms reported per polarity
pub const DEFAULT_TOP_TERMS: usize = 10;

/// Count and share of one label
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LabelShare {
    pub count: usize,

    /// `count / total * 100`, rounded to one decimal
    pub percentage: f64,
}

/// Label distribution over a batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    pub positive: LabelShare,
    pub neutral: LabelShare,
    pub negative: LabelShare,
}

impl Distribution {
    pub fn get(&self, label: SentimentLabel) -> LabelShare {
        match label {
            SentimentLabel::Positive => self.positive,
            SentimentLabel::Neutral => self.neutral,
            SentimentLabel::Negative => self.negative,
        }
    }
}

/// Most frequent key terms across a batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MostCommonTerms {
    pub positive: Vec<String>,
    pub negative: Vec<String>,
}

/// Derived statistics for one batch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchStatistics {
    pub total: usize,
    pub distribution: Distribution,

    /// Mean polarity (+1, 0, -1), rounded to two decimals
    pub overall_sentiment_score: f64,

    /// Mean confidence, rounded to two decimals
    pub average_confidence: f64,

    pub most_common_terms: MostCommonTerms,
}

/// Aggregates an ordered result sequence
///
/// Term ties resolve by first-encountered order, so callers must pass
/// results in input order.
#[derive(Debug, Clone, Copy)]
pub struct StatisticsAggregator {
    top_terms: usize,
}

impl Default for StatisticsAggregator {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_TERMS)
    }
}

impl StatisticsAggregator {
    pub fn new(top_terms: usize) -> Self {
        Self { top_terms }
    }

    pub fn aggregate(&self, results: &[AnalysisResult]) -> BatchStatistics {
        let total = results.len();

        let count_of = |label: SentimentLabel| results.iter().filter(|r| r.sentiment == label).count();
        let share = |label: SentimentLabel| {
            let count = count_of(label);
            LabelShare {
                count,
                percentage: round_to(ratio(count as f64, total) * 100.0, 1),
            }
        };

        let distribution = Distribution {
            positive: share(SentimentLabel::Positive),
            neutral: share(SentimentLabel::Neutral),
            negative: share(SentimentLabel::Negative),
        };

        let polarity_sum: i64 = results.iter().map(|r| i64::from(r.sentiment.polarity())).sum();
        let confidence_sum: f64 = results.iter().map(|r| r.confidence).sum();

        BatchStatistics {
            total,
            distribution,
            overall_sentiment_score: round_to(ratio(polarity_sum as f64, total), 2),
            average_confidence: round_to(ratio(confidence_sum, total), 2),
            most_common_terms: MostCommonTerms {
                positive: self.most_common(results.iter().flat_map(|r| &r.key_terms.positive)),
                negative: self.most_common(results.iter().flat_map(|r| &r.key_terms.negative)),
            },
        }
    }

    /// Terms by descending frequency, ties in first-encountered order
    fn most_common<'a>(&self, terms: impl Iterator<Item = &'a String>) -> Vec<String> {
        let mut order: Vec<(&'a str, usize)> = Vec::new();
        let mut index: HashMap<&'a str, usize> = HashMap::new();

        for term in terms {
            let next = order.len();
            let i = *index.entry(term.as_str()).or_insert(next);
            if i == next {
                order.push((term.as_str(), 0));
            }
            order[i].1 += 1;
        }

        // Stable sort keeps first-encountered order among equal counts.
        order.sort_by(|a, b| b.1.cmp(&a.1));
        order
            .into_iter()
            .take(self.top_terms)
            .map(|(term, _)| term.to_string())
            .collect()
    }
}

fn ratio(numerator: f64, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        numerator / total as f64
    }
}

/// Round to `decimals` places, ties to even
fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    let scaled = value * factor;
    let mut rounded = scaled.round();
    if (scaled - scaled.trunc()).abs() == 0.5 && rounded % 2.0 != 0.0 {
        rounded -= scaled.signum();
    }
    rounded / factor
}
