//! Configuration digests
//!
//! Provides [`ConfigDigest`], a 16-byte MD5 digest of a configuration's
//! sorted scenario list. Used as a deduplication and debugging key; primary
//! identity of a test stays its UUID.

use crate::error::DigestError;
use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// MD5 digest of a sorted scenario list
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ConfigDigest([u8; 16]);

impl ConfigDigest {
    /// Create from raw bytes
    #[inline]
    #[must_use]
    pub const fn new(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    #[inline]
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Digest an already sorted scenario list
    ///
    /// The hashed text is the list rendered as a JSON-style array with
    /// `", "` separators, e.g. `["s1", "s2"]`.
    #[must_use]
    pub fn of_sorted<S: AsRef<str>>(sorted: &[S]) -> Self {
        let canonical = Self::canonical_form(sorted);
        Self(Md5::digest(canonical.as_bytes()).into())
    }

    /// Text that [`ConfigDigest::of_sorted`] hashes
    #[must_use]
    pub fn canonical_form<S: AsRef<str>>(sorted: &[S]) -> String {
        let items: Vec<String> = sorted
            .iter()
            .map(|s| format!("\"{}\"", s.as_ref()))
            .collect();
        format!("[{}]", items.join(", "))
    }

    /// Short string representation (first 8 hex chars)
    #[inline]
    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl Display for ConfigDigest {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl FromStr for ConfigDigest {
    type Err = DigestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s)?;
        let arr: [u8; 16] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| DigestError::InvalidLength {
                expected: 16,
                actual: bytes.len(),
            })?;
        Ok(Self(arr))
    }
}

impl TryFrom<String> for ConfigDigest {
    type Error = DigestError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ConfigDigest> for String {
    fn from(value: ConfigDigest) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_form_matches_array_rendering() {
        assert_eq!(ConfigDigest::canonical_form(&["1", "2"]), r#"["1", "2"]"#);
        assert_eq!(ConfigDigest::canonical_form::<&str>(&[]), "[]");
    }

    #[test]
    fn empty_list_digest_is_md5_of_brackets() {
        // md5("[]")
        let digest = ConfigDigest::of_sorted::<&str>(&[]);
        assert_eq!(digest.to_string(), "d751713988987e9331980363e24189ce");
    }

    #[test]
    fn digest_is_deterministic() {
        let a = ConfigDigest::of_sorted(&["a", "b"]);
        let b = ConfigDigest::of_sorted(&["a", "b"]);
        assert_eq!(a, b);
        assert_ne!(a, ConfigDigest::of_sorted(&["a"]));
    }

    #[test]
    fn hex_roundtrip_through_serde() {
        let digest = ConfigDigest::of_sorted(&["s1"]);
        let json = serde_json::to_string(&digest).unwrap();
        assert_eq!(json.len(), 34);
        let back: ConfigDigest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, digest);
    }

    #[test]
    fn rejects_wrong_length() {
        let err = "abcd".parse::<ConfigDigest>().unwrap_err();
        assert!(matches!(
            err,
            DigestError::InvalidLength {
                expected: 16,
                actual: 2
            }
        ));
    }

    #[test]
    fn rejects_invalid_hex() {
        let err = "zz".parse::<ConfigDigest>().unwrap_err();
        assert_eq!(
            err,
            DigestError::InvalidHex(hex::FromHexError::InvalidHexCharacter { c: 'z', index: 0 })
        );
        assert!(err.to_string().starts_with("invalid hex"));
    }

    #[test]
    fn short_is_eight_chars() {
        assert_eq!(ConfigDigest::of_sorted(&["x"]).short().len(), 8);
    }
}
