use sha2::{Digest, Sha256};

/// Fingerprint a service token for comparison (SHA-256 hex).
/// Only the fingerprint is held in memory; the raw token stays in the environment.
pub fn token_fingerprint(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    let out = hasher.finalize();
    hex::encode(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_is_stable_hex() {
        let a = token_fingerprint("secret");
        let b = token_fingerprint("secret");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn different_tokens_differ() {
        assert_ne!(token_fingerprint("a"), token_fingerprint("b"));
    }
}
