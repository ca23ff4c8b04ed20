//! Full-text search infrastructure for documentation entries.
//!
//! This module provides tokenization, weighted inverted indexing, scoring, and
//! query resolution.

// Module declarations
pub(crate) mod index;
pub(crate) mod query;
pub(crate) mod scoring;
pub(crate) mod tokenize;

// Public re-exports (used via lib.rs)
pub use index::{Posting, SearchIndex};
pub use query::{QueryOptions, ScoredEntry, Suggestion};
pub use scoring::IdfFormula;
pub use tokenize::Tokenizer;
