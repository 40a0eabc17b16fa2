//! VoteSense Signals
//!
//! The three independent evidence sources consumed by the fusion engine:
//! - a pre-trained statistical classifier behind the [`Classifier`] trait
//! - a positive/negative word lexicon
//! - an emoji weight table
//!
//! plus the text normalization that sits between raw input and the lexicon
//! and classifier. Nothing here fails on the lexicon or emoji path; absence
//! of evidence scores as neutral.

pub mod classifier;
pub mod config;
pub mod emoji;
pub mod lexicon;
pub mod linear_model;
pub mod loader;
pub mod preprocess;

pub use classifier::{predict_checked, Classifier, ModelPrediction, RawPrediction};
pub use config::{EmojiConfig, LexiconConfig, MergeMode, ModelSourceConfig, SignalsConfig};
pub use emoji::{EmojiScan, EmojiScorer};
pub use lexicon::{Lexicon, LexiconCounts, LexiconScorer, TermPolarity};
pub use linear_model::{LinearModel, LinearModelSpec};
pub use loader::{FileModelLoader, ModelLoader, StaticModelLoader};
pub use preprocess::{NormalizedText, StandardPreprocessor, TextPreprocessor};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::classifier::{Classifier, ModelPrediction, RawPrediction};
    pub use crate::emoji::EmojiScorer;
    pub use crate::lexicon::{Lexicon, LexiconScorer};
    pub use crate::loader::ModelLoader;
    pub use crate::preprocess::{StandardPreprocessor, TextPreprocessor};
}
