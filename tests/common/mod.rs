//! Shared test fixtures and utilities for integration tests.
//!
//! # Available Fixtures
//!
//! - `fixture_source`: raw text of `tests/fixtures/search_index.js`
//! - `fixture_entries`: the parsed entries of that file
//! - `fixture_index`: a [`SearchIndex`] built with the default configuration
//! - `temp_dir`: an isolated directory for on-disk loader and config tests

#![allow(dead_code, unreachable_pub)]

use documenter_search::{Entry, SearchConfig, SearchIndex, parse_index};
use rstest::fixture;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Returns the project root directory (where Cargo.toml lives).
pub fn project_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

pub fn fixture_path() -> PathBuf {
    project_root().join("tests/fixtures/search_index.js")
}

#[fixture]
pub fn fixture_source() -> String {
    documenter_search::tracing::init();
    std::fs::read_to_string(fixture_path()).expect("fixture search index should be readable")
}

#[fixture]
pub fn fixture_entries(fixture_source: String) -> Vec<Entry> {
    parse_index(&fixture_source).expect("fixture search index should parse")
}

#[fixture]
pub fn fixture_index(fixture_entries: Vec<Entry>) -> SearchIndex {
    SearchIndex::build(fixture_entries, &SearchConfig::default())
}

#[fixture]
pub fn temp_dir() -> TempDir {
    documenter_search::tracing::init();
    tempfile::tempdir().expect("failed to create temp dir")
}

/// Writes `contents` to `name` inside `dir` and returns the full path.
pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("failed to write test file");
    path
}
