//! Content fingerprinting for duplicate-page detection.

use sha2::{Digest, Sha256};

/// SHA-256 hex digest over a normalized byte sequence.
///
/// Used only for equality comparison between consecutive pages of one
/// thread; never persisted. A stable digest (rather than the runtime's
/// seeded hash) keeps comparisons reproducible across runs.
pub fn fingerprint(normalized: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(normalized.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_is_stable() {
        assert_eq!(fingerprint("page content"), fingerprint("page content"));
    }

    #[test]
    fn test_fingerprint_distinguishes_content() {
        assert_ne!(fingerprint("page 2"), fingerprint("page 3"));
    }

    #[test]
    fn test_fingerprint_known_value() {
        // SHA-256 of the empty string
        assert_eq!(
            fingerprint(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
