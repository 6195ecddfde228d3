/// Cache key derivation
///
/// Keys take the form `{namespace}:{class}:{sha256-hex(identifier)}`. The
/// digest keeps arbitrary identifiers inside a fixed key alphabet; the class
/// segment keeps data and stats for the same identifier apart.
use sha2::{Digest, Sha256};

/// Key class for cached tokenomics records
pub const DATA_CLASS: &str = "data";

/// Key class for per-identifier hit/miss statistics
pub const STATS_CLASS: &str = "stats";

/// Lowercase hex SHA-256 of the identifier
pub fn identifier_digest(identifier: &str) -> String {
    format!("{:x}", Sha256::digest(identifier.as_bytes()))
}

pub fn build_key(namespace: &str, class: &str, identifier: &str) -> String {
    format!("{}:{}:{}", namespace, class, identifier_digest(identifier))
}

pub fn data_key(namespace: &str, identifier: &str) -> String {
    build_key(namespace, DATA_CLASS, identifier)
}

pub fn stats_key(namespace: &str, identifier: &str) -> String {
    build_key(namespace, STATS_CLASS, identifier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_shape() {
        let key = data_key("tokenomics", "TOKEN123");
        let parts: Vec<&str> = key.split(':').collect();

        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "tokenomics");
        assert_eq!(parts[1], "data");
        assert_eq!(parts[2].len(), 64);
        assert!(parts[2].chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_known_digest() {
        assert_eq!(
            identifier_digest("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_data_and_stats_keys_differ() {
        assert_ne!(data_key("tokenomics", "TOKEN123"), stats_key("tokenomics", "TOKEN123"));
        assert_ne!(data_key("tokenomics", "TOKEN123"), data_key("other", "TOKEN123"));
        assert_eq!(data_key("tokenomics", "TOKEN123"), data_key("tokenomics", "TOKEN123"));
    }
}
