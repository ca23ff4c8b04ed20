//! Parsing Documenter `search_index.js` files into entries.
//!
//! Documenter writes the index as a JavaScript assignment,
//! `var documenterSearchIndex = {"docs": [...]}`. Both that form and the bare
//! JSON object are accepted.

use crate::error::{MalformedInput, Result, SearchError};
use crate::types::{Entry, RawEntry};
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use std::sync::LazyLock;

/// Matches a leading `var name =` (or `let`/`const`, or a bare `window.name =`).
static ASSIGNMENT_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:(?:var|let|const)\s+)?[A-Za-z_$][\w$.]*\s*=\s*").unwrap()
});

/// Parses the contents of a search index file.
///
/// Fails with [`SearchError::MalformedInput`] when the JSON is invalid, `docs`
/// is missing or not an array, or an entry lacks `location` or `page`.
/// Missing or null `title`, `text` and `category` default to empty values.
pub fn parse_index(source: &str) -> Result<Vec<Entry>> {
    let body = strip_assignment(source);

    let value: Value =
        serde_json::from_str(body).map_err(|e| MalformedInput::Syntax(e.to_string()))?;

    let mut root = match value {
        Value::Object(root) => root,
        other => {
            return Err(MalformedInput::RootNotObject {
                found: json_kind(&other),
            }
            .into());
        }
    };

    let docs = match root.remove("docs") {
        Some(Value::Array(docs)) => docs,
        Some(other) => {
            return Err(MalformedInput::DocsNotArray {
                found: json_kind(&other),
            }
            .into());
        }
        None => return Err(MalformedInput::MissingDocs.into()),
    };

    let entries = docs
        .into_iter()
        .enumerate()
        .map(|(index, value)| parse_entry(index, value))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    tracing::debug!("Parsed {} search index entries", entries.len());
    Ok(entries)
}

/// Reads and parses a search index file.
pub fn load_index(path: &Path) -> Result<Vec<Entry>> {
    let source = std::fs::read_to_string(path).map_err(|source| SearchError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let entries = parse_index(&source)?;
    tracing::info!("Loaded {} entries from {}", entries.len(), path.display());
    Ok(entries)
}

/// Removes a byte order mark, a JavaScript assignment wrapper and a trailing
/// semicolon, if present.
fn strip_assignment(source: &str) -> &str {
    let source = source.trim_start_matches('\u{feff}');
    let body = match ASSIGNMENT_PREFIX.find(source) {
        Some(prefix) => &source[prefix.end()..],
        None => source,
    };
    body.trim_end().trim_end_matches(';')
}

fn parse_entry(index: usize, value: Value) -> std::result::Result<Entry, MalformedInput> {
    if !value.is_object() {
        return Err(MalformedInput::EntryNotObject {
            index,
            found: json_kind(&value),
        });
    }

    let raw = RawEntry::deserialize(value).map_err(|e| MalformedInput::InvalidEntry {
        index,
        message: e.to_string(),
    })?;

    raw.into_entry().map_err(|e| e.at(index))
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;
    use assert2::check;
    use rstest::rstest;

    fn malformed(source: &str) -> MalformedInput {
        match parse_index(source) {
            Err(SearchError::MalformedInput(reason)) => reason,
            other => panic!("expected malformed input, got {:?}", other),
        }
    }

    #[rstest]
    #[case(r#"{"docs": []}"#)]
    #[case(r#"var documenterSearchIndex = {"docs": []}"#)]
    #[case("var documenterSearchIndex = {\"docs\":\n[]\n}\n")]
    #[case(r#"const index = {"docs": []};"#)]
    #[case(r#"window.documenterSearchIndex = {"docs": []};"#)]
    #[case("\u{feff}var documenterSearchIndex = {\"docs\": []}")]
    #[case("\u{feff}{\"docs\": []}")]
    fn test_accepts_json_and_assignment(#[case] source: &str) {
        check!(parse_index(source).unwrap().is_empty());
    }

    #[test]
    fn test_parses_entries_in_order() {
        let entries = parse_index(
            r##"{"docs":[
                {"location":"","page":"Home","title":"Home","text":"CurrentModule = X","category":"page"},
                {"location":"#X","page":"Home","title":"X","text":"","category":"section"}
            ]}"##,
        )
        .unwrap();

        check!(entries.len() == 2);
        check!(entries[0].location.is_empty());
        check!(entries[0].category == Category::Page);
        check!(entries[1].location == "#X");
        check!(entries[1].category == Category::Section);
    }

    #[test]
    fn test_optional_fields_missing_or_null() {
        let entries =
            parse_index(r##"{"docs":[{"location":"#a","page":"P","title":null,"category":null}]}"##)
                .unwrap();
        check!(entries[0].title.is_empty());
        check!(entries[0].text.is_empty());
        check!(entries[0].category == Category::default());
    }

    #[rstest]
    #[case("", MalformedInput::Syntax(String::new()))]
    #[case("[1, 2]", MalformedInput::RootNotObject { found: "array" })]
    #[case("{}", MalformedInput::MissingDocs)]
    #[case(r#"{"docs": {}}"#, MalformedInput::DocsNotArray { found: "object" })]
    #[case(r#"{"docs": ["x"]}"#, MalformedInput::EntryNotObject { index: 0, found: "string" })]
    #[case(r#"{"docs": [{"page": "P"}]}"#, MalformedInput::MissingField { index: 0, field: "location" })]
    #[case(r#"{"docs": [{"location": "", "page": "P"}, {"location": ""}]}"#, MalformedInput::MissingField { index: 1, field: "page" })]
    #[case(r#"{"docs": [{"location": "", "page": null}]}"#, MalformedInput::MissingField { index: 0, field: "page" })]
    #[case(r#"{"docs": [{"location": "", "page": ""}]}"#, MalformedInput::EmptyField { index: 0, field: "page" })]
    fn test_malformed_input(#[case] source: &str, #[case] expected: MalformedInput) {
        let reason = malformed(source);
        match expected {
            // serde_json messages are not part of the contract
            MalformedInput::Syntax(_) => {
                check!(matches!(reason, MalformedInput::Syntax(_)));
            }
            expected => {
                check!(reason == expected);
            }
        }
    }

    #[test]
    fn test_entries_match_direct_deserialization() {
        let source = r##"{"docs":[{"location":"#a","page":"P","title":"T","category":"method"}]}"##;
        let direct: Entry =
            serde_json::from_str(r##"{"location":"#a","page":"P","title":"T","category":"method"}"##)
                .unwrap();
        check!(parse_index(source).unwrap() == vec![direct]);
    }

    #[test]
    fn test_wrong_field_type() {
        let reason = malformed(r#"{"docs": [{"location": 7, "page": "P"}]}"#);
        check!(matches!(reason, MalformedInput::InvalidEntry { index: 0, .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_index(&dir.path().join("search_index.js")).unwrap_err();
        check!(matches!(err, SearchError::Io { .. }));
    }
}
