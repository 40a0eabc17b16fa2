//! Rule-based lexicon scoring
//!
//! A fixed pair of positive and negative word sets, matched against
//! normalized tokens by exact string equality.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Default positive words for voter feedback
pub const DEFAULT_POSITIVE_WORDS: &[&str] = &[
    "good", "great", "excellent", "amazing", "wonderful", "fantastic", "easy", "efficient",
    "secure", "transparent", "fair", "accessible", "innovative", "helpful", "convenient",
    "trustworthy", "reliable", "effective", "satisfied", "impressed", "smooth", "seamless",
    "accurate", "intuitive", "responsive", "fast", "quick", "privacy", "private", "protected",
    "simple", "clear", "legitimate", "verifiable", "authentic", "like", "love", "approve",
    "support", "recommend", "confident", "confidence", "perfect", "valuable", "beneficial",
    "advantage", "success", "successful", "improvement", "improved", "enhance", "enhanced",
    "superior", "best", "better", "positive", "gain", "gained", "progress", "progressed",
    "achieve", "achieved",
];

/// Default negative words for voter feedback
pub const DEFAULT_NEGATIVE_WORDS: &[&str] = &[
    "bad", "poor", "terrible", "awful", "disappointing", "difficult", "complex", "complicated",
    "confusing", "slow", "insecure", "unfair", "biased", "suspicious", "unreliable", "buggy",
    "glitchy", "error", "problem", "issue", "concern", "worried", "frustrated", "annoyed",
    "angry", "disappointed", "failed", "failure", "crash", "broken", "vulnerable", "risky",
    "unsafe", "hack", "fraud", "manipulation", "dislike", "hate", "against", "reject", "oppose",
    "fear", "hard", "inefficient", "inconvenient", "incompetent", "waste", "wasted", "obstacle",
    "obstruct", "obstructed", "hindrance", "flawed", "bug", "glitch", "malfunction", "fault",
    "flaw", "wrong", "worse", "worst", "negative", "loss", "lost",
];

/// Polarity of a lexicon entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TermPolarity {
    Positive,
    Negative,
}

/// Positive and negative word sets
#[derive(Debug, Clone)]
pub struct Lexicon {
    positive: HashSet<String>,
    negative: HashSet<String>,
}

impl Lexicon {
    /// Build a lexicon from word lists; entries are lowercased and trimmed
    pub fn new<P, N>(positive: P, negative: N) -> Self
    where
        P: IntoIterator,
        P::Item: AsRef<str>,
        N: IntoIterator,
        N::Item: AsRef<str>,
    {
        Self {
            positive: normalize_words(positive),
            negative: normalize_words(negative),
        }
    }

    /// Add words to either side
    pub fn extend<I>(&mut self, polarity: TermPolarity, words: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let target = match polarity {
            TermPolarity::Positive => &mut self.positive,
            TermPolarity::Negative => &mut self.negative,
        };
        target.extend(normalize_words(words));
    }

    /// Polarity of a token, if it is a lexicon word
    ///
    /// A word present in both sets reports positive here, while
    /// [`LexiconScorer::count`] and key-term extraction check each side
    /// independently and count it on both.
    pub fn polarity(&self, token: &str) -> Option<TermPolarity> {
        if self.positive.contains(token) {
            Some(TermPolarity::Positive)
        } else if self.negative.contains(token) {
            Some(TermPolarity::Negative)
        } else {
            None
        }
    }

    pub fn is_positive(&self, token: &str) -> bool {
        self.positive.contains(token)
    }

    pub fn is_negative(&self, token: &str) -> bool {
        self.negative.contains(token)
    }

    /// Number of (positive, negative) words
    pub fn len(&self) -> (usize, usize) {
        (self.positive.len(), self.negative.len())
    }

    pub fn is_empty(&self) -> bool {
        self.positive.is_empty() && self.negative.is_empty()
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::new(DEFAULT_POSITIVE_WORDS, DEFAULT_NEGATIVE_WORDS)
    }
}

fn normalize_words<I>(words: I) -> HashSet<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    words
        .into_iter()
        .map(|w| w.as_ref().trim().to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}

/// Lexicon match counts for one token sequence
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LexiconCounts {
    pub positive: usize,
    pub negative: usize,
}

impl LexiconCounts {
    /// Normalized score in [-1, 1]; 0 when nothing matched
    pub fn score(&self) -> f64 {
        let total = self.positive + self.negative;
        if total == 0 {
            return 0.0;
        }
        (self.positive as f64 - self.negative as f64) / total as f64
    }
}

/// Scores token sequences against a lexicon
#[derive(Debug, Clone, Default)]
pub struct LexiconScorer {
    lexicon: Lexicon,
}

impl LexiconScorer {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Count positive and negative matches; repeated tokens count each time
    pub fn count<S: AsRef<str>>(&self, tokens: &[S]) -> LexiconCounts {
        tokens.iter().fold(LexiconCounts::default(), |mut counts, token| {
            let token = token.as_ref();
            if self.lexicon.is_positive(token) {
                counts.positive += 1;
            }
            if self.lexicon.is_negative(token) {
                counts.negative += 1;
            }
            counts
        })
    }

    /// `(pos - neg) / (pos + neg)`, or 0 when no lexicon word is present
    pub fn score<S: AsRef<str>>(&self, tokens: &[S]) -> f64 {
        self.count(tokens).score()
    }
}
