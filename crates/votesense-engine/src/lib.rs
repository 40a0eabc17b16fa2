//! VoteSense Analysis Engine
//!
//! Turns one piece of voter feedback into a labelled, explained sentiment
//! and rolls batches up into summary statistics.
//!
//! Each text is scored by three independent signals:
//! - Classifier probabilities over negative / neutral / positive
//! - Lexicon polarity from curated voting-domain word lists
//! - Emoji weights
//!
//! The signals are fused into an ensemble score, a confidence estimate is
//! derived from classifier certainty and signal agreement, and matching
//! lexicon words are surfaced as key terms.

pub mod analyzer;
pub mod confidence;
pub mod config;
pub mod fusion;
pub mod key_terms;
pub mod result;
pub mod shared;
pub mod statistics;

pub use analyzer::{AnalyzerBuilder, BatchAnalysis, SentimentAnalyzer};
pub use confidence::{ConfidenceEstimator, ConfidenceOutcome};
pub use config::{EngineConfig, FusionWeights, Thresholds};
pub use fusion::{FusionEngine, FusionOutcome, PerSignal};
pub use key_terms::{KeyTermExtractor, KeyTerms};
pub use result::{AnalysisDebug, AnalysisResult};
pub use shared::SharedAnalyzer;
pub use statistics::{BatchStatistics, Distribution, LabelShare, MostCommonTerms, StatisticsAggregator};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::analyzer::{AnalyzerBuilder, BatchAnalysis, SentimentAnalyzer};
    pub use crate::config::EngineConfig;
    pub use crate::result::AnalysisResult;
    pub use crate::shared::SharedAnalyzer;
    pub use crate::statistics::BatchStatistics;
}
