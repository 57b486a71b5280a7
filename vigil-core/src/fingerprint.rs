use std::fmt;

use sha2::{Digest, Sha256};

/// How many leading hex characters are safe to show a submitter.
pub const PREFIX_LEN: usize = 10;

/// Content-derived identifier of an artifact: the lowercase-hex SHA-256 of
/// its bytes. Identical content always yields an identical fingerprint, so
/// it doubles as the dedup key and the storage key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn of(bytes: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        Fingerprint(hex::encode(hasher.finalize()))
    }

    pub fn as_hex(&self) -> &str {
        &self.0
    }

    /// Truncated form for user-visible messages and logs; the full key is
    /// never surfaced outside the system.
    pub fn prefix(&self) -> &str {
        &self.0[..PREFIX_LEN]
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_content_yields_identical_fingerprints() {
        let a = Fingerprint::of(b"the quick brown fox");
        let b = Fingerprint::of(b"the quick brown fox");
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_content_yields_distinct_fingerprints() {
        let inputs: &[&[u8]] = &[
            b"",
            b"a",
            b"b",
            b"ab",
            b"ba",
            b"invoice-123",
            b"invoice-124",
        ];
        for (i, left) in inputs.iter().enumerate() {
            for right in &inputs[i + 1..] {
                assert_ne!(Fingerprint::of(left), Fingerprint::of(right));
            }
        }
    }

    #[test]
    fn matches_known_sha256_vector() {
        let fp = Fingerprint::of(b"invoice-123");
        assert_eq!(
            fp.as_hex(),
            "b66e5d8a3f966ab97a07d5c250d32315a12eccf733119756c85fd24e4d1d5ffb"
        );
    }

    #[test]
    fn prefix_is_ten_hex_chars() {
        let fp = Fingerprint::of(b"invoice-123");
        assert_eq!(fp.prefix(), "b66e5d8a3f");
        assert_eq!(fp.prefix().len(), PREFIX_LEN);
    }
}
