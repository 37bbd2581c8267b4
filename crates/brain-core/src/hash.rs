//! SHA-256 content hashing, formatted as `sha256:` + lowercase hex.
//!
//! File-hash and string-hash of the same bytes must agree; both funnel
//! through the same digest routine so that can never drift.

use sha2::{Digest, Sha256};
use std::fmt;

/// A `sha256:`-prefixed lowercase hex digest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ContentHash(String);

const PREFIX: &str = "sha256:";

impl ContentHash {
    /// Hashes raw bytes.
    pub fn of_bytes(bytes: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        let digest = hasher.finalize();
        Self(format!("{PREFIX}{digest:x}"))
    }

    /// Hashes a UTF-8 string (identical to `of_bytes(s.as_bytes())`).
    pub fn of_str(s: &str) -> Self {
        Self::of_bytes(s.as_bytes())
    }

    /// Returns the full `sha256:...` string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses a previously-formatted hash string, validating its shape.
    pub fn parse(s: &str) -> Option<Self> {
        let hex = s.strip_prefix(PREFIX)?;
        if hex.len() == 64 && hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            Some(Self(s.to_string()))
        } else {
            None
        }
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_and_byte_hash_agree() {
        let s = "hello brain";
        assert_eq!(ContentHash::of_str(s), ContentHash::of_bytes(s.as_bytes()));
    }

    #[test]
    fn formatted_with_prefix_and_64_hex_chars() {
        let h = ContentHash::of_str("x");
        assert!(h.as_str().starts_with("sha256:"));
        assert_eq!(h.as_str().len(), "sha256:".len() + 64);
    }

    #[test]
    fn parse_roundtrip() {
        let h = ContentHash::of_str("roundtrip me");
        let parsed = ContentHash::parse(h.as_str()).unwrap();
        assert_eq!(h, parsed);
    }

    #[test]
    fn parse_rejects_bad_shape() {
        assert!(ContentHash::parse("not-a-hash").is_none());
        assert!(ContentHash::parse("sha256:tooshort").is_none());
    }

    #[test]
    fn different_content_differs() {
        assert_ne!(ContentHash::of_str("a"), ContentHash::of_str("b"));
    }
}
