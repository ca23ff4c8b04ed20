//! Error handling types and utilities.

use std::path::PathBuf;
use thiserror::Error;

/// A specialized Result type for documenter-search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors surfaced while loading entries or configuration.
///
/// Building, tokenizing and querying are total and never produce one of these.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The search index source could not be turned into entries.
    #[error("malformed search index: {0}")]
    MalformedInput(#[from] MalformedInput),

    /// Reading a file from disk failed.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A TOML configuration document was rejected.
    #[error("invalid search configuration: {0}")]
    Config(#[from] toml::de::Error),
}

impl SearchError {
    /// Returns the malformed-input reason, if this is a data error.
    pub const fn as_malformed(&self) -> Option<&MalformedInput> {
        match self {
            Self::MalformedInput(reason) => Some(reason),
            _ => None,
        }
    }
}

/// Why a search index document was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedInput {
    #[error("not valid JSON: {0}")]
    Syntax(String),

    #[error("top-level value must be an object, found {found}")]
    RootNotObject { found: &'static str },

    #[error("missing `docs` key")]
    MissingDocs,

    #[error("`docs` must be an array, found {found}")]
    DocsNotArray { found: &'static str },

    #[error("entry {index} must be an object, found {found}")]
    EntryNotObject { index: usize, found: &'static str },

    #[error("entry {index} is missing `{field}`")]
    MissingField { index: usize, field: &'static str },

    #[error("entry {index} has an empty `{field}`")]
    EmptyField { index: usize, field: &'static str },

    #[error("entry {index}: {message}")]
    InvalidEntry { index: usize, message: String },
}
