//! Per-text analysis and batch analysis
//!
//! The analyzer owns read-only state only: the signal tables, the
//! normalizer, the fusion configuration and a shared classifier. It is
//! `Send + Sync` and is shared behind an `Arc` without locking.

use crate::config::EngineConfig;
use crate::confidence::ConfidenceEstimator;
use crate::fusion::FusionEngine;
use crate::key_terms::KeyTermExtractor;
use crate::result::{AnalysisDebug, AnalysisResult};
use crate::statistics::{BatchStatistics, StatisticsAggregator};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};
use votesense_core::{Error, Result};
use votesense_signals::{
    predict_checked, Classifier, EmojiScorer, Lexicon, LexiconScorer, SignalsConfig,
    StandardPreprocessor, TextPreprocessor,
};

/// Results for a batch, in input order, plus their statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchAnalysis {
    pub results: Vec<AnalysisResult>,
    pub statistics: BatchStatistics,
}

/// Everything an analyzer needs except the classifier
///
/// Kept separate so the classifier can be loaded lazily and plugged in once.
#[derive(Clone)]
pub struct AnalyzerBuilder {
    preprocessor: Arc<dyn TextPreprocessor>,
    lexicon: Lexicon,
    emoji: Arc<EmojiScorer>,
    engine: EngineConfig,
}

impl AnalyzerBuilder {
    /// Builder with the default voter-feedback tables and weights
    pub fn new() -> Result<Self> {
        Ok(Self {
            preprocessor: Arc::new(StandardPreprocessor::new()?),
            lexicon: Lexicon::default(),
            emoji: Arc::new(EmojiScorer::new()?),
            engine: EngineConfig::default(),
        })
    }

    /// Builder from signal and engine configuration
    pub fn from_config(signals: &SignalsConfig, engine: EngineConfig) -> Result<Self> {
        engine.validate()?;
        Ok(Self {
            preprocessor: Arc::new(StandardPreprocessor::new()?),
            lexicon: signals.build_lexicon(),
            emoji: Arc::new(signals.build_emoji_scorer()?),
            engine,
        })
    }

    pub fn preprocessor(mut self, preprocessor: Arc<dyn TextPreprocessor>) -> Self {
        self.preprocessor = preprocessor;
        self
    }

    pub fn lexicon(mut self, lexicon: Lexicon) -> Self {
        self.lexicon = lexicon;
        self
    }

    pub fn emoji(mut self, emoji: EmojiScorer) -> Self {
        self.emoji = Arc::new(emoji);
        self
    }

    pub fn engine_config(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }

    /// Assemble an analyzer around a loaded classifier
    pub fn build(&self, classifier: Arc<dyn Classifier>) -> Result<SentimentAnalyzer> {
        let fusion = FusionEngine::new(self.engine.weights, self.engine.thresholds)?;

        let (positive, negative) = self.lexicon.len();
        info!(
            classifier = classifier.name(),
            positive_words = positive,
            negative_words = negative,
            emoji_glyphs = self.emoji.glyph_count(),
            "Sentiment analyzer ready"
        );

        Ok(SentimentAnalyzer {
            preprocessor: Arc::clone(&self.preprocessor),
            lexicon: LexiconScorer::new(self.lexicon.clone()),
            emoji: Arc::clone(&self.emoji),
            classifier,
            fusion,
            confidence: ConfidenceEstimator::new(),
            key_terms: KeyTermExtractor::default(),
            statistics: StatisticsAggregator::default(),
        })
    }
}

/// Fuses classifier, lexicon and emoji evidence into one sentiment per text
pub struct SentimentAnalyzer {
    preprocessor: Arc<dyn TextPreprocessor>,
    lexicon: LexiconScorer,
    emoji: Arc<EmojiScorer>,
    classifier: Arc<dyn Classifier>,
    fusion: FusionEngine,
    confidence: ConfidenceEstimator,
    key_terms: KeyTermExtractor,
    statistics: StatisticsAggregator,
}

impl SentimentAnalyzer {
    /// Analyzer with default tables around the given classifier
    pub fn new(classifier: Arc<dyn Classifier>) -> Result<Self> {
        AnalyzerBuilder::new()?.build(classifier)
    }

    pub fn classifier_name(&self) -> &str {
        self.classifier.name()
    }

    /// Analyze one text; empty text is rejected
    pub fn analyze_text(&self, text: &str) -> Result<AnalysisResult> {
        if text.is_empty() {
            return Err(Error::invalid_input("text must be a non-empty string"));
        }
        self.analyze_unchecked(text)
    }

    fn analyze_unchecked(&self, text: &str) -> Result<AnalysisResult> {
        let start = Instant::now();

        let scan = self.emoji.scan(text);
        let normalized = self.preprocessor.normalize(&scan.stripped);
        let lexicon_score = self.lexicon.score(&normalized.tokens);

        let prediction = predict_checked(self.classifier.as_ref(), &normalized.cleaned)?;

        let fused = self.fusion.fuse(&prediction, lexicon_score, scan.score);
        let confidence = self
            .confidence
            .estimate(&prediction, lexicon_score, scan.score);
        let key_terms = self
            .key_terms
            .extract(self.lexicon.lexicon(), &normalized.tokens);

        debug!(
            sentiment = %fused.label,
            ensemble_score = fused.ensemble_score,
            confidence = confidence.confidence,
            lexicon_score,
            emoji_score = scan.score,
            latency_us = start.elapsed().as_micros() as u64,
            "Analyzed text"
        );

        Ok(AnalysisResult {
            original_text: text.to_string(),
            sentiment: fused.label,
            confidence: confidence.confidence,
            class_probabilities: prediction.probabilities,
            key_terms,
            debug: AnalysisDebug {
                classifier_label: prediction.label,
                classifier_name: self.classifier.name().to_string(),
                lexicon_score,
                emoji_score: scan.score,
                adjusted_values: fused.values,
                weights: fused.weights,
                contributions: fused.contributions,
                ensemble_score: fused.ensemble_score,
                agreement_factor: confidence.agreement_factor,
                readings: confidence.readings,
            },
        })
    }

    /// Analyze texts one after another, then aggregate
    ///
    /// Any string is accepted, including empty ones.
    pub fn analyze_batch<S: AsRef<str>>(&self, texts: &[S]) -> Result<BatchAnalysis> {
        let results = texts
            .iter()
            .map(|text| self.analyze_unchecked(text.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        Ok(self.finish_batch(results))
    }

    /// Fan a batch out over blocking worker threads, then aggregate in input
    /// order
    pub async fn analyze_batch_concurrent(self: &Arc<Self>, texts: Vec<String>) -> Result<BatchAnalysis> {
        let workers = num_cpus::get().max(1);
        let chunk_size = texts.len().div_ceil(workers).max(1);

        let handles: Vec<_> = texts
            .chunks(chunk_size)
            .map(|chunk| {
                let chunk = chunk.to_vec();
                let analyzer = Arc::clone(self);
                tokio::task::spawn_blocking(move || {
                    chunk
                        .iter()
                        .map(|text| analyzer.analyze_unchecked(text))
                        .collect::<Result<Vec<_>>>()
                })
            })
            .collect();

        let mut results = Vec::with_capacity(texts.len());
        for joined in join_all(handles).await {
            let chunk = joined.map_err(|e| Error::internal(format!("analysis worker failed: {e}")))??;
            results.extend(chunk);
        }

        Ok(self.finish_batch(results))
    }

    fn finish_batch(&self, results: Vec<AnalysisResult>) -> BatchAnalysis {
        let statistics = self.statistics.aggregate(&results);
        debug!(
            total = statistics.total,
            overall = statistics.overall_sentiment_score,
            "Analyzed batch"
        );
        BatchAnalysis {
            results,
            statistics,
        }
    }
}

impl std::fmt::Debug for SentimentAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentimentAnalyzer")
            .field("classifier", &self.classifier.name())
            .field("emoji", &self.emoji)
            .field("fusion", &self.fusion)
            .finish()
    }
}
