//! Text normalization ahead of lexicon scoring and classification

use regex::Regex;
use std::collections::HashSet;
use votesense_core::{Error, Result};

/// Token substituted for `!`
pub const EXCLAMATION_TOKEN: &str = "exclamation";

/// Token substituted for `?`
pub const QUESTION_TOKEN: &str = "question";

/// English stop words
pub const ENGLISH_STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't",
    "didn", "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven",
    "haven't", "isn", "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn",
    "needn't", "shan", "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't",
    "won", "won't", "wouldn", "wouldn't",
];

/// Irregular plurals the suffix rules would get wrong
const IRREGULAR_PLURALS: &[(&str, &str)] = &[
    ("children", "child"),
    ("men", "man"),
    ("women", "woman"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("mice", "mouse"),
    ("geese", "goose"),
    ("lives", "life"),
    ("wives", "wife"),
    ("knives", "knife"),
    ("leaves", "leaf"),
    ("analyses", "analysis"),
    ("crises", "crisis"),
];

/// Words ending in `s` that are already base forms
const SINGULAR_S_WORDS: &[&str] = &[
    "always", "perhaps", "news", "series", "species", "bus", "gas", "yes", "thus", "basis",
    "analysis", "crisis", "canvas", "chaos", "lens", "whereas", "nevertheless", "progress",
];

/// Output of text normalization
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedText {
    /// Tokens joined by single spaces, the classifier's input
    pub cleaned: String,

    /// Lemmatized tokens with stop words removed
    pub tokens: Vec<String>,
}

impl NormalizedText {
    pub fn from_tokens(tokens: Vec<String>) -> Self {
        Self {
            cleaned: tokens.join(" "),
            tokens,
        }
    }
}

/// Turns emoji-free raw text into cleaned text plus tokens
pub trait TextPreprocessor: Send + Sync {
    fn normalize(&self, text: &str) -> NormalizedText;
}

/// Regex-based normalizer with stop-word removal and noun lemmatization
#[derive(Debug, Clone)]
pub struct StandardPreprocessor {
    non_word: Regex,
    stop_words: HashSet<String>,
}

impl StandardPreprocessor {
    /// Create a normalizer with the English stop-word list
    pub fn new() -> Result<Self> {
        Self::with_stop_words(ENGLISH_STOP_WORDS.iter().copied())
    }

    /// Create a normalizer with a custom stop-word list
    pub fn with_stop_words<I>(stop_words: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let non_word = Regex::new(r"[^\w\s]")
            .map_err(|e| Error::config(format!("Failed to compile normalizer regex: {e}")))?;

        Ok(Self {
            non_word,
            stop_words: stop_words
                .into_iter()
                .map(|w| w.as_ref().to_lowercase())
                .collect(),
        })
    }

    pub fn is_stop_word(&self, token: &str) -> bool {
        self.stop_words.contains(token)
    }
}

impl TextPreprocessor for StandardPreprocessor {
    fn normalize(&self, text: &str) -> NormalizedText {
        let marked = text
            .replace('!', &format!(" {EXCLAMATION_TOKEN} "))
            .replace('?', &format!(" {QUESTION_TOKEN} "))
            .to_lowercase();
        let stripped = self.non_word.replace_all(&marked, " ");

        let tokens = stripped
            .split_whitespace()
            .filter(|token| !self.is_stop_word(token))
            .map(lemmatize)
            .collect();

        NormalizedText::from_tokens(tokens)
    }
}

/// Reduce a lowercase token to its singular noun form
pub fn lemmatize(token: &str) -> String {
    if let Some((_, lemma)) = IRREGULAR_PLURALS.iter().find(|(plural, _)| *plural == token) {
        return (*lemma).to_string();
    }

    let chars = token.chars().count();
    if chars <= 3
        || SINGULAR_S_WORDS.contains(&token)
        || !token.ends_with('s')
        || token.ends_with("ss")
        || token.ends_with("us")
        || token.ends_with("is")
        || token.ends_with("ous")
    {
        return token.to_string();
    }

    if chars > 4 && token.ends_with("ies") {
        return format!("{}y", &token[..token.len() - 3]);
    }

    for suffix in ["sses", "shes", "ches", "xes", "zes"] {
        if token.ends_with(suffix) {
            return token[..token.len() - 2].to_string();
        }
    }

    token[..token.len() - 1].to_string()
}
