//! Lexicon words that appeared in a text, for explainability only

use serde::{Deserialize, Serialize};
use votesense_signals::Lexicon;

/// Default cap per polarity
pub const DEFAULT_KEY_TERM_CAP: usize = 5;

/// Positive and negative lexicon words found in a text, in token order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyTerms {
    pub positive: Vec<String>,
    pub negative: Vec<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct KeyTermExtractor {
    cap: usize,
}

impl Default for KeyTermExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_KEY_TERM_CAP)
    }
}

impl KeyTermExtractor {
    pub fn new(cap: usize) -> Self {
        Self { cap }
    }

    /// First `cap` positive and first `cap` negative tokens, repeats included
    pub fn extract<S: AsRef<str>>(&self, lexicon: &Lexicon, tokens: &[S]) -> KeyTerms {
        let collect = |keep: &dyn Fn(&str) -> bool| -> Vec<String> {
            tokens
                .iter()
                .map(|t| t.as_ref())
                .filter(|t| keep(*t))
                .take(self.cap)
                .map(str::to_string)
                .collect()
        };

        KeyTerms {
            positive: collect(&|t| lexicon.is_positive(t)),
            negative: collect(&|t| lexicon.is_negative(t)),
        }
    }
}
