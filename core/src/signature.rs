//! Request signing.
//!
//! Every provider call carries `api_key` and `sig`. The signature is derived
//! from the credential pair alone, so it is computed once per client and
//! reused for every request.

use sha2::{Digest, Sha256};

const HEAD_LEN: usize = 10;
const TAIL_LEN: usize = 5;

/// Length of every signature produced by [`signature`].
pub const SIGNATURE_LEN: usize = HEAD_LEN + TAIL_LEN;

/// Derive the provider signature for a credential pair.
///
/// Hex SHA-256 of `api_key + api_secret`, reduced to its first ten and last
/// five hex characters.
#[must_use]
pub fn signature(api_key: &str, api_secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(api_key.as_bytes());
    hasher.update(api_secret.as_bytes());
    let digest = hex::encode(hasher.finalize());

    let mut sig = String::with_capacity(SIGNATURE_LEN);
    sig.push_str(&digest[..HEAD_LEN]);
    sig.push_str(&digest[digest.len() - TAIL_LEN..]);
    sig
}

/// The `api_key`/`sig` pair stamped onto every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    api_key: String,
    signature: String,
}

impl Credentials {
    /// Sign `api_key` with `api_secret`. The secret is not retained.
    pub fn new(api_key: impl Into<String>, api_secret: &str) -> Self {
        let api_key = api_key.into();
        let signature = signature(&api_key, api_secret);
        Self { api_key, signature }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// The `api_key` and `sig` query parameters, in that order.
    pub fn query(&self) -> Vec<(String, String)> {
        vec![
            ("api_key".to_string(), self.api_key.clone()),
            ("sig".to_string(), self.signature.clone()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_is_head_and_tail_of_digest() {
        // sha256("") = e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855
        assert_eq!(signature("", ""), "e3b0c442982b855");
        assert_eq!(signature("key", "secret"), "d6ff675739e4260");
    }

    #[test]
    fn signature_concatenates_without_separator() {
        assert_eq!(signature("ab", "c"), signature("a", "bc"));
        assert_eq!(signature("abc", ""), signature("", "abc"));
    }

    #[test]
    fn signature_has_fixed_length() {
        for (key, secret) in [("", ""), ("key", "secret"), ("ключ", "секрет")] {
            assert_eq!(signature(key, secret).len(), SIGNATURE_LEN);
        }
    }

    #[test]
    fn signature_is_deterministic_and_input_sensitive() {
        let sig = signature("key", "secret");
        assert_eq!(sig, signature("key", "secret"));
        assert_ne!(sig, signature("key", "secret2"));
        assert_ne!(sig, signature("key2", "secret"));
    }

    #[test]
    fn credentials_cache_signature() {
        let creds = Credentials::new("key", "secret");
        assert_eq!(creds.api_key(), "key");
        assert_eq!(creds.signature(), signature("key", "secret"));
        assert_eq!(
            creds.query(),
            vec![
                ("api_key".to_string(), "key".to_string()),
                ("sig".to_string(), signature("key", "secret")),
            ]
        );
    }
}
