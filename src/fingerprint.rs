//! Source fingerprints for skipping rebuilds of unchanged search indexes.

use std::fmt;
use xxhash_rust::xxh3::xxh3_64;

/// Content hash of a search index source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceFingerprint(u64);

impl SourceFingerprint {
    /// Hashes raw source text.
    pub fn of(source: &str) -> Self {
        Self(xxh3_64(source.as_bytes()))
    }

    /// Returns the hash as a lowercase hexadecimal string
    pub fn as_hex(&self) -> String {
        format!("{:016x}", self.0)
    }
}

impl fmt::Display for SourceFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    #[test]
    fn test_same_source_same_fingerprint() {
        let source = r#"{"docs": []}"#;
        check!(SourceFingerprint::of(source) == SourceFingerprint::of(source));
        check!(SourceFingerprint::of(source) != SourceFingerprint::of(r#"{"docs":[]}"#));
    }

    #[test]
    fn test_hex_is_fixed_width() {
        check!(SourceFingerprint(0xab).as_hex() == "00000000000000ab");
        check!(SourceFingerprint::of("").to_string().len() == 16);
    }
}
