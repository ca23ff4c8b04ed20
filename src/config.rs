//! Scoring and tokenizer configuration.

use crate::error::{Result, SearchError};
use crate::search::scoring::IdfFormula;
use crate::search::tokenize::STOP_WORDS;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Query results memoized per index snapshot unless configured otherwise.
const DEFAULT_CACHE_CAPACITY: usize = 64;

/// Knobs for building and querying a search index.
///
/// Every key is optional when loaded from TOML; missing keys take the defaults
/// below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Multiplier applied to each occurrence of a token in an entry title.
    pub title_weight: f32,
    /// Multiplier applied to each occurrence of a token in an entry body.
    pub text_weight: f32,
    /// Rarity factor applied per matched token at query time.
    pub idf: IdfFormula,
    /// Number of query results memoized per index snapshot. 0 disables the cache.
    pub cache_capacity: usize,
    pub tokenizer: TokenizerConfig,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            title_weight: 3.0,
            text_weight: 1.0,
            idf: IdfFormula::default(),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            tokenizer: TokenizerConfig::default(),
        }
    }
}

impl SearchConfig {
    /// Parses a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Reads and parses a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|source| SearchError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!("Loaded search config from {}", path.display());
        Ok(config)
    }

    /// Title weight clamped to a finite, non-negative value.
    pub(crate) fn effective_title_weight(&self) -> f32 {
        sanitize_weight(self.title_weight)
    }

    /// Body weight clamped to a finite, non-negative value.
    pub(crate) fn effective_text_weight(&self) -> f32 {
        sanitize_weight(self.text_weight)
    }
}

fn sanitize_weight(weight: f32) -> f32 {
    if weight.is_finite() { weight.max(0.0) } else { 0.0 }
}

/// Tokenizer configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TokenizerConfig {
    /// Tokens shorter than this many characters are dropped.
    pub min_token_length: usize,
    /// Apply English stemming after filtering.
    pub stem: bool,
    /// Lower-case words that are never indexed or queried.
    pub stop_words: Vec<String>,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            min_token_length: 2,
            stem: false,
            stop_words: STOP_WORDS.iter().map(|word| (*word).to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use rstest::rstest;

    #[test]
    fn test_empty_document_is_default() {
        let config = SearchConfig::from_toml_str("").unwrap();
        check!(config == SearchConfig::default());
    }

    #[test]
    fn test_partial_document() {
        let config = SearchConfig::from_toml_str(
            r#"
            title_weight = 5.0
            idf = "smooth"

            [tokenizer]
            stem = true
            stop_words = ["the"]
            "#,
        )
        .unwrap();

        check!(config.title_weight == 5.0);
        check!(config.text_weight == 1.0);
        check!(config.idf == IdfFormula::Smooth);
        check!(config.tokenizer.stem);
        check!(config.tokenizer.min_token_length == 2);
        check!(config.tokenizer.stop_words == vec!["the".to_string()]);
    }

    #[rstest]
    #[case("title_wieght = 2.0")]
    #[case("idf = \"bm25\"")]
    #[case("cache_capacity = -1")]
    fn test_rejects_bad_documents(#[case] source: &str) {
        let err = SearchConfig::from_toml_str(source).unwrap_err();
        check!(matches!(err, SearchError::Config(_)));
    }

    #[rstest]
    #[case(3.0, 3.0)]
    #[case(-1.0, 0.0)]
    #[case(f32::NAN, 0.0)]
    #[case(f32::INFINITY, 0.0)]
    fn test_weights_are_sanitized(#[case] raw: f32, #[case] expected: f32) {
        let config = SearchConfig {
            title_weight: raw,
            ..SearchConfig::default()
        };
        check!(config.effective_title_weight() == expected);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = SearchConfig::load(&dir.path().join("search.toml")).unwrap_err();
        check!(matches!(err, SearchError::Io { .. }));
    }
}
