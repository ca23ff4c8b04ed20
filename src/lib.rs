//! In-memory full-text search over Documenter `search_index.js` entries.
//!
//! ```no_run
//! use documenter_search::{SearchConfig, SearchHandle};
//! use std::path::Path;
//!
//! let path = Path::new("docs/build/search_index.js");
//! let handle = SearchHandle::open(path, SearchConfig::default())?;
//! for hit in handle.query("contract", 10).iter() {
//!     println!("{} ({}): {}", hit.entry.title, hit.entry.page, hit.entry.location);
//! }
//! # Ok::<(), documenter_search::SearchError>(())
//! ```

pub mod config;
pub mod error;
pub mod fingerprint;
pub mod handle;
pub mod loader;
pub mod search;
pub mod tracing;
pub mod types;

pub use config::{SearchConfig, TokenizerConfig};
pub use error::{MalformedInput, Result, SearchError};
pub use fingerprint::SourceFingerprint;
pub use handle::SearchHandle;
pub use loader::{load_index, parse_index};
pub use search::{
    IdfFormula, Posting, QueryOptions, ScoredEntry, SearchIndex, Suggestion, Tokenizer,
};
pub use types::{Category, Entry};
