//! VoteSense Core
//!
//! Core types and error handling shared across VoteSense components.
//!
//! This crate provides:
//! - The closed sentiment label and signal source enumerations
//! - Per-signal readings and the three-way class probability vector
//! - Error types and result handling

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{ClassProbabilities, SentimentLabel, SignalReading, SignalSource};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::types::{ClassProbabilities, SentimentLabel, SignalReading, SignalSource};
}
