//! Weighted inverted index over documentation entries.

use crate::config::SearchConfig;
use crate::types::Entry;
use ahash::AHashMap;

use super::scoring::IdfFormula;
use super::tokenize::Tokenizer;

/// One entry's weight for one token.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Posting {
    /// Position of the entry in [`SearchIndex::entries`].
    pub entry: usize,
    /// Title occurrences times the title weight plus body occurrences times the body weight.
    pub weight: f64,
}

/// An immutable, searchable index over an ordered list of entries.
///
/// Built once with [`SearchIndex::build`] and never mutated afterwards, so it
/// can be shared between threads freely. Reloading entries means building a
/// new value.
#[derive(Debug)]
pub struct SearchIndex {
    entries: Vec<Entry>,
    /// Map from token to postings, ordered by entry position
    postings: AHashMap<String, Vec<Posting>>,
    tokenizer: Tokenizer,
    idf: IdfFormula,
}

impl SearchIndex {
    /// Builds an index over `entries`, preserving their order.
    pub fn build(entries: Vec<Entry>, config: &SearchConfig) -> Self {
        IndexBuilder::new(config).finalize(entries)
    }

    /// All indexed entries in their original order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// The entry at `position`, as reported in [`Posting::entry`].
    pub fn entry(&self, position: usize) -> Option<&Entry> {
        self.entries.get(position)
    }

    /// Get the number of entries in the index
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the number of unique tokens in the index
    pub fn term_count(&self) -> usize {
        self.postings.len()
    }

    /// Postings for an already normalized token. Empty when the token is unknown.
    pub fn postings(&self, token: &str) -> &[Posting] {
        self.postings.get(token).map_or(&[], Vec::as_slice)
    }

    /// The tokenizer used at build time; queries go through the same one.
    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    pub const fn idf(&self) -> IdfFormula {
        self.idf
    }

    /// Every indexed token, in no particular order.
    pub fn vocabulary(&self) -> impl Iterator<Item = &str> {
        self.postings.keys().map(String::as_str)
    }
}

/// Accumulates per-entry token weights before producing the final index.
struct IndexBuilder {
    tokenizer: Tokenizer,
    title_weight: f64,
    text_weight: f64,
    idf: IdfFormula,
    postings: AHashMap<String, Vec<Posting>>,
    total_pairs: usize,
}

impl IndexBuilder {
    fn new(config: &SearchConfig) -> Self {
        Self {
            tokenizer: Tokenizer::new(&config.tokenizer),
            title_weight: f64::from(config.effective_title_weight()),
            text_weight: f64::from(config.effective_text_weight()),
            idf: config.idf,
            postings: AHashMap::new(),
            total_pairs: 0,
        }
    }

    /// Adds one entry's title and body tokens under `position`.
    fn add_entry(&mut self, position: usize, entry: &Entry) {
        let mut weights: AHashMap<String, f64> = AHashMap::new();

        for token in self.tokenizer.tokenize(&entry.title) {
            *weights.entry(token).or_insert(0.0) += self.title_weight;
        }
        for token in self.tokenizer.tokenize(&entry.text) {
            *weights.entry(token).or_insert(0.0) += self.text_weight;
        }

        self.total_pairs += weights.len();
        // Entries are added in order, so each list stays sorted by position.
        for (token, weight) in weights {
            self.postings.entry(token).or_default().push(Posting {
                entry: position,
                weight,
            });
        }
    }

    fn finalize(mut self, entries: Vec<Entry>) -> SearchIndex {
        let start = std::time::Instant::now();

        for (position, entry) in entries.iter().enumerate() {
            self.add_entry(position, entry);
        }

        let index = SearchIndex {
            entries,
            postings: self.postings,
            tokenizer: self.tokenizer,
            idf: self.idf,
        };

        tracing::info!(
            "Built search index: {} unique terms, {} entries, {} term-entry pairs in {:?}",
            index.term_count(),
            index.len(),
            self.total_pairs,
            start.elapsed()
        );

        index
    }
}
