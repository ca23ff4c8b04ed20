//! Query execution against a built [`SearchIndex`].

use crate::types::{Category, Entry};
use ahash::{AHashMap, AHashSet};
use rapidfuzz::distance::jaro_winkler;

use super::index::SearchIndex;
use super::scoring::{Hit, compare_hits};

/// Minimum Jaro-Winkler similarity for a vocabulary token to be suggested.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// A ranked query result.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredEntry {
    /// Position of the entry in the index's entry list.
    pub index: usize,
    pub entry: Entry,
    pub score: f64,
    /// Distinct query tokens the entry matched.
    pub matched_terms: usize,
}

/// Options for [`SearchIndex::query_with`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct QueryOptions {
    /// Maximum number of results. 0 means unlimited.
    pub limit: usize,
    /// Only entries with one of these categories are considered.
    pub categories: Option<Vec<Category>>,
}

impl QueryOptions {
    pub const fn with_limit(limit: usize) -> Self {
        Self {
            limit,
            categories: None,
        }
    }

    #[must_use]
    pub fn categories(mut self, categories: impl IntoIterator<Item = Category>) -> Self {
        self.categories = Some(categories.into_iter().collect());
        self
    }

    fn admits(&self, category: &Category) -> bool {
        self.categories
            .as_ref()
            .is_none_or(|allowed| allowed.contains(category))
    }
}

/// A vocabulary token close to an unmatched query term.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub token: String,
    pub similarity: f64,
}

impl SearchIndex {
    /// Searches for entries matching free-text `text`.
    ///
    /// Results are ranked by number of distinct matched query tokens, then by
    /// score, then by entry order, with at most one result per `location`.
    /// `limit == 0` returns every match.
    pub fn query(&self, text: &str, limit: usize) -> Vec<ScoredEntry> {
        self.query_with(text, &QueryOptions::with_limit(limit))
    }

    /// Like [`SearchIndex::query`], with a category filter.
    pub fn query_with(&self, text: &str, options: &QueryOptions) -> Vec<ScoredEntry> {
        let tokens = self.tokenizer().unique_tokens(text);

        if tokens.is_empty() {
            tracing::debug!("Query {:?} produced no tokens", text);
            return vec![];
        }

        // Accumulate per entry so each entry is scored once however many tokens it matches
        let mut accumulated: AHashMap<usize, Hit> = AHashMap::new();

        for token in &tokens {
            let postings = self.postings(token);
            let idf = self.idf().factor(postings.len(), self.len());

            for posting in postings {
                if !options.admits(&self.entries()[posting.entry].category) {
                    continue;
                }
                let hit = accumulated.entry(posting.entry).or_insert(Hit {
                    entry: posting.entry,
                    score: 0.0,
                    matched_terms: 0,
                });
                hit.score += posting.weight * idf;
                hit.matched_terms += 1;
            }
        }

        let mut hits: Vec<Hit> = accumulated.into_values().collect();
        hits.sort_by(compare_hits);

        // Keep the best ranked entry per location
        let mut seen_locations = AHashSet::new();
        let limit = if options.limit == 0 {
            usize::MAX
        } else {
            options.limit
        };

        let results: Vec<ScoredEntry> = hits
            .into_iter()
            .filter(|hit| seen_locations.insert(self.entries()[hit.entry].location.as_str()))
            .take(limit)
            .map(|hit| ScoredEntry {
                index: hit.entry,
                entry: self.entries()[hit.entry].clone(),
                score: hit.score,
                matched_terms: hit.matched_terms,
            })
            .collect();

        tracing::debug!(
            "Query {:?} ({} tokens) returned {} results",
            text,
            tokens.len(),
            results.len()
        );

        results
    }

    /// Suggests indexed tokens similar to `term`, most similar first.
    ///
    /// `term` is normalized with the index tokenizer; each of its tokens that
    /// is absent from the index is compared against the whole vocabulary.
    pub fn suggest(&self, term: &str, limit: usize) -> Vec<Suggestion> {
        let mut best: AHashMap<&str, f64> = AHashMap::new();

        for token in self.tokenizer().unique_tokens(term) {
            if !self.postings(&token).is_empty() {
                continue;
            }
            for candidate in self.vocabulary() {
                let similarity = jaro_winkler::similarity(token.chars(), candidate.chars());
                if similarity >= SUGGESTION_THRESHOLD {
                    let slot = best.entry(candidate).or_insert(similarity);
                    *slot = slot.max(similarity);
                }
            }
        }

        let mut suggestions: Vec<Suggestion> = best
            .into_iter()
            .map(|(token, similarity)| Suggestion {
                token: token.to_string(),
                similarity,
            })
            .collect();
        suggestions.sort_by(|a, b| {
            b.similarity
                .total_cmp(&a.similarity)
                .then_with(|| a.token.cmp(&b.token))
        });
        if limit > 0 {
            suggestions.truncate(limit);
        }
        suggestions
    }
}
