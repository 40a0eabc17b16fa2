//! Emoji sentiment scoring
//!
//! Scans raw text for known glyphs with an Aho-Corasick automaton, sums their
//! weights per occurrence and returns the text with every match blanked out.

use aho_corasick::{AhoCorasick, MatchKind};
use votesense_core::{Error, Result};

/// Default glyph weights for voter feedback, roughly -3..=3
///
/// Several glyphs carry a trailing U+FE0F variation selector and are matched
/// as the full two-code-point sequence.
pub const DEFAULT_EMOJI_WEIGHTS: &[(&str, i32)] = &[
    ("😊", 2),
    ("👍", 2),
    ("🙂", 1),
    ("😀", 2),
    ("😃", 2),
    ("😄", 2),
    ("😁", 2),
    ("🥰", 3),
    ("\u{2764}\u{FE0F}", 3),
    ("👏", 2),
    ("✅", 1),
    ("\u{2714}\u{FE0F}", 1),
    ("💯", 2),
    ("🔒", 1),
    ("\u{1F6E1}\u{FE0F}", 1),
    ("🌟", 2),
    ("😞", -2),
    ("👎", -2),
    ("😟", -1),
    ("😠", -2),
    ("😡", -3),
    ("😢", -2),
    ("😭", -3),
    ("❌", -1),
    ("⛔", -1),
    ("🚫", -1),
    ("\u{26A0}\u{FE0F}", -1),
    ("🔓", -1),
    ("💔", -2),
    ("😕", -1),
];

/// Result of an emoji scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmojiScan {
    /// Input text with every matched glyph replaced by a space
    pub stripped: String,

    /// Sum of the weights of every matched occurrence
    pub score: i32,

    /// Number of matched occurrences
    pub matches: usize,
}

/// Glyph-weight scorer
pub struct EmojiScorer {
    matcher: AhoCorasick,
    weights: Vec<i32>,
}

impl EmojiScorer {
    /// Create a scorer over the default voter-feedback table
    pub fn new() -> Result<Self> {
        Self::with_weights(DEFAULT_EMOJI_WEIGHTS.iter().map(|(g, w)| (g.to_string(), *w)))
    }

    /// Create a scorer over a custom glyph table
    pub fn with_weights(table: impl IntoIterator<Item = (String, i32)>) -> Result<Self> {
        let (glyphs, weights): (Vec<String>, Vec<i32>) =
            table.into_iter().filter(|(g, _)| !g.is_empty()).unzip();

        let matcher = AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostLongest)
            .build(&glyphs)
            .map_err(|e| Error::config(format!("Failed to build emoji matcher: {e}")))?;

        Ok(Self { matcher, weights })
    }

    /// Number of glyphs in the table
    pub fn glyph_count(&self) -> usize {
        self.weights.len()
    }

    /// Score and strip the emoji in `text`; never fails
    pub fn scan(&self, text: &str) -> EmojiScan {
        let mut stripped = String::with_capacity(text.len());
        let mut score = 0i32;
        let mut matches = 0usize;
        let mut last = 0usize;

        for m in self.matcher.find_iter(text) {
            stripped.push_str(&text[last..m.start()]);
            stripped.push(' ');
            last = m.end();

            score = score.saturating_add(self.weights[m.pattern().as_usize()]);
            matches += 1;
        }
        stripped.push_str(&text[last..]);

        EmojiScan {
            stripped,
            score,
            matches,
        }
    }
}

impl std::fmt::Debug for EmojiScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmojiScorer")
            .field("glyphs", &self.weights.len())
            .finish()
    }
}
