//! Text tokenization and optional stemming shared by indexing and querying.

use crate::config::TokenizerConfig;
use ahash::AHashSet;
use rust_stemmers::{Algorithm, Stemmer};
use std::fmt;

/// Common English stop words to filter out from indexing.
/// These high-frequency words add little value to search relevance.
pub(crate) const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "he", "in", "is", "it",
    "its", "of", "on", "that", "the", "to", "was", "will", "with",
];

/// Splits text into normalized search tokens.
///
/// The same value tokenizes entry titles and bodies at build time and query
/// text at search time, so both sides always agree on what a token is.
pub struct Tokenizer {
    min_token_length: usize,
    stop_words: AHashSet<String>,
    stemmer: Option<Stemmer>,
}

impl fmt::Debug for Tokenizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tokenizer")
            .field("min_token_length", &self.min_token_length)
            .field("stop_words", &self.stop_words.len())
            .field("stem", &self.stemmer.is_some())
            .finish()
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(&TokenizerConfig::default())
    }
}

impl Tokenizer {
    pub fn new(config: &TokenizerConfig) -> Self {
        Self {
            min_token_length: config.min_token_length,
            stop_words: config
                .stop_words
                .iter()
                .map(|word| word.to_lowercase())
                .collect(),
            stemmer: config.stem.then(|| Stemmer::create(Algorithm::English)),
        }
    }

    /// Tokenizes text in reading order, keeping repeats.
    ///
    /// Words are maximal runs of alphanumeric characters; everything else
    /// (punctuation, `_`, `-`, `.`, whitespace, braces) is a boundary. So
    /// `"FastMPOContractions.contract_fit"` yields
    /// `["fastmpocontractions", "contract", "fit"]`.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        text.to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|word| !word.is_empty())
            .filter_map(|word| self.normalize(word))
            .collect()
    }

    /// Tokenizes text and drops repeats, keeping first-occurrence order.
    pub fn unique_tokens(&self, text: &str) -> Vec<String> {
        let mut seen = AHashSet::new();
        self.tokenize(text)
            .into_iter()
            .filter(|token| seen.insert(token.clone()))
            .collect()
    }

    /// Applies the length, stop word and stem rules to a lower-cased word.
    fn normalize(&self, word: &str) -> Option<String> {
        if word.chars().count() < self.min_token_length {
            return None;
        }

        // Skip stop words
        if self.stop_words.contains(word) {
            return None;
        }

        match &self.stemmer {
            Some(stemmer) => Some(stemmer.stem(word).into_owned()),
            None => Some(word.to_string()),
        }
    }
}
