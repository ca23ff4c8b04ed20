//! Shared, hot-swappable access to the current search index.
//!
//! A [`SearchHandle`] owns one [`Snapshot`] at a time: a built index, the
//! fingerprint of the source it came from, and an LRU cache of query results
//! computed against it. Reloading builds the replacement off-lock and swaps the
//! whole snapshot in under a short write lock, so readers see either the old
//! index or the new one, never a partial build. Dropping the old snapshot drops
//! its cache with it.

use crate::config::SearchConfig;
use crate::error::{Result, SearchError};
use crate::fingerprint::SourceFingerprint;
use crate::loader::parse_index;
use crate::search::{QueryOptions, ScoredEntry, SearchIndex};
use crate::types::Entry;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

/// Query results memoized per snapshot, keyed by query text and options.
type QueryCache = LruCache<(String, QueryOptions), Arc<[ScoredEntry]>>;

/// One immutable index generation.
struct Snapshot {
    index: Arc<SearchIndex>,
    /// `None` when the entries did not come from source text
    fingerprint: Option<SourceFingerprint>,
    cache: Option<Mutex<QueryCache>>,
}

impl Snapshot {
    fn new(
        entries: Vec<Entry>,
        config: &SearchConfig,
        fingerprint: Option<SourceFingerprint>,
    ) -> Self {
        Self {
            index: Arc::new(SearchIndex::build(entries, config)),
            fingerprint,
            cache: NonZeroUsize::new(config.cache_capacity)
                .map(|capacity| Mutex::new(LruCache::new(capacity))),
        }
    }

    fn query(&self, text: &str, options: &QueryOptions) -> Arc<[ScoredEntry]> {
        let Some(cache) = &self.cache else {
            return self.index.query_with(text, options).into();
        };

        let key = (text.to_string(), options.clone());
        if let Some(results) = cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            tracing::debug!("Query cache hit for {:?}", text);
            return Arc::clone(results);
        }

        // Computed outside the lock; concurrent misses store identical values.
        let results: Arc<[ScoredEntry]> = self.index.query_with(text, options).into();
        cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .put(key, Arc::clone(&results));
        results
    }
}

/// Thread-safe owner of the current search index.
pub struct SearchHandle {
    config: SearchConfig,
    current: RwLock<Arc<Snapshot>>,
}

impl std::fmt::Debug for SearchHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let snapshot = self.current();
        f.debug_struct("SearchHandle")
            .field("entries", &snapshot.index.len())
            .field("terms", &snapshot.index.term_count())
            .field("fingerprint", &snapshot.fingerprint)
            .field("cached", &snapshot.cache.is_some())
            .finish()
    }
}

impl SearchHandle {
    /// Builds a handle over an explicit entry list.
    pub fn new(entries: Vec<Entry>, config: SearchConfig) -> Self {
        let snapshot = Snapshot::new(entries, &config, None);
        Self {
            config,
            current: RwLock::new(Arc::new(snapshot)),
        }
    }

    /// Parses `source` (JSON or the `search_index.js` assignment) and builds a handle.
    pub fn from_source(source: &str, config: SearchConfig) -> Result<Self> {
        let entries = parse_index(source)?;
        let snapshot = Snapshot::new(entries, &config, Some(SourceFingerprint::of(source)));
        Ok(Self {
            config,
            current: RwLock::new(Arc::new(snapshot)),
        })
    }

    /// Loads a search index file and builds a handle.
    pub fn open(path: &Path, config: SearchConfig) -> Result<Self> {
        let source = read_source(path)?;
        Self::from_source(&source, config)
    }

    /// Configuration every snapshot of this handle is built with.
    pub const fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// The index currently being served. Stays valid after later reloads.
    pub fn snapshot(&self) -> Arc<SearchIndex> {
        Arc::clone(&self.current().index)
    }

    /// Fingerprint of the source the current index was built from.
    pub fn fingerprint(&self) -> Option<SourceFingerprint> {
        self.current().fingerprint
    }

    /// Runs a query against the current index. `limit == 0` means unlimited.
    pub fn query(&self, text: &str, limit: usize) -> Arc<[ScoredEntry]> {
        self.query_with(text, &QueryOptions::with_limit(limit))
    }

    pub fn query_with(&self, text: &str, options: &QueryOptions) -> Arc<[ScoredEntry]> {
        self.current().query(text, options)
    }

    /// Rebuilds from new source text.
    ///
    /// Returns `false` without rebuilding when the source is byte-identical to
    /// the one currently served. On a parse error the current index is kept.
    pub fn reload_source(&self, source: &str) -> Result<bool> {
        let fingerprint = SourceFingerprint::of(source);
        if self.current().fingerprint == Some(fingerprint) {
            tracing::debug!("Search index source unchanged ({}), skipping rebuild", fingerprint);
            return Ok(false);
        }

        let entries = parse_index(source)?;
        self.swap(Snapshot::new(entries, &self.config, Some(fingerprint)));
        Ok(true)
    }

    /// Rebuilds from a search index file; see [`SearchHandle::reload_source`].
    pub fn reload_path(&self, path: &Path) -> Result<bool> {
        let source = read_source(path)?;
        self.reload_source(&source)
    }

    /// Replaces the served index with one built over `entries`.
    pub fn replace(&self, entries: Vec<Entry>) {
        self.swap(Snapshot::new(entries, &self.config, None));
    }

    fn current(&self) -> Arc<Snapshot> {
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    fn swap(&self, snapshot: Snapshot) {
        let entries = snapshot.index.len();
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(snapshot);
        tracing::info!("Swapped in rebuilt search index ({} entries)", entries);
    }
}

/// Reads a search index file without parsing it, so it can be fingerprinted first.
fn read_source(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| SearchError::Io {
        path: path.to_path_buf(),
        source,
    })
}
