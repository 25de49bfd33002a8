//! Shared-secret comparison for externally triggered endpoints.

use sha2::{Digest, Sha256};

/// Compare a supplied secret against the configured one.
///
/// Both sides are hashed first so the comparison runs over fixed-length
/// digests and does not short-circuit on the first differing byte. An empty
/// or missing configured secret never matches.
pub fn secrets_match(supplied: Option<&str>, configured: Option<&str>) -> bool {
    let (Some(supplied), Some(configured)) = (supplied, configured) else {
        return false;
    };
    if configured.is_empty() {
        return false;
    }

    let a = Sha256::digest(supplied.as_bytes());
    let b = Sha256::digest(configured.as_bytes());
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_secret() {
        assert!(secrets_match(Some("s3cret"), Some("s3cret")));
    }

    #[test]
    fn mismatch_and_missing() {
        assert!(!secrets_match(Some("s3cret"), Some("other")));
        assert!(!secrets_match(None, Some("s3cret")));
        assert!(!secrets_match(Some("s3cret"), None));
        assert!(!secrets_match(Some(""), Some("")));
    }
}
