use sha2::{Digest, Sha256};

/// Prefix shared by every cached summary key.
pub const CACHE_KEY_PREFIX: &str = "summary:";

/// Compute SHA-256 of an in-memory byte slice.
pub fn sha256_bytes(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Encode a raw 32-byte hash as a lowercase hex string (64 chars).
pub fn to_hex(hash: &[u8; 32]) -> String {
    hash.iter().map(|b| format!("{b:02x}")).collect()
}

/// Cache key for an uploaded statement: `summary:<sha256 hex>`.
///
/// Keyed on content alone, so the same PDF uploaded under another name
/// still hits.
pub fn cache_key(data: &[u8]) -> String {
    key_for_hex(&to_hex(&sha256_bytes(data)))
}

/// Cache key for a content hash already in hex form.
pub fn key_for_hex(content_hash: &str) -> String {
    format!("{CACHE_KEY_PREFIX}{content_hash}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_bytes_known_vector() {
        // SHA-256 of empty bytes is a known constant.
        let hash = sha256_bytes(b"");
        assert_eq!(
            to_hex(&hash),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn sha256_bytes_deterministic() {
        assert_eq!(sha256_bytes(b"%PDF-1.4"), sha256_bytes(b"%PDF-1.4"));
        assert_ne!(sha256_bytes(b"%PDF-1.4"), sha256_bytes(b"%PDF-1.5"));
    }

    #[test]
    fn cache_key_layout() {
        let key = cache_key(b"");
        assert_eq!(
            key,
            "summary:e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(key.len(), CACHE_KEY_PREFIX.len() + 64);
    }

    #[test]
    fn key_for_hex_matches_cache_key() {
        let hex = to_hex(&sha256_bytes(b"%PDF-1.4"));
        assert_eq!(key_for_hex(&hex), cache_key(b"%PDF-1.4"));
        assert_eq!(key_for_hex("ab"), "summary:ab");
    }
}
