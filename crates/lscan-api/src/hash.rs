use lscan_core::errors::LscanError;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::serde::to_canonical_json_bytes;

/// Lowercase hex SHA-256 of raw bytes.
pub fn sha256_hex(bytes: &[u8]) -> String {
    Sha256::digest(bytes)
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect()
}

/// Digest of the canonical JSON encoding of `value`.
///
/// Two payloads with the same content hash equally regardless of the field
/// order their producers used.
pub fn stable_hash_string<T: Serialize>(value: &T) -> Result<String, LscanError> {
    Ok(sha256_hex(&to_canonical_json_bytes(value)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_digest() {
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn key_order_does_not_change_digest() {
        let a: serde_json::Value = serde_json::from_str(r#"{"t": 1.0, "label": 2}"#).unwrap();
        let b: serde_json::Value = serde_json::from_str(r#"{"label": 2, "t": 1.0}"#).unwrap();
        assert_eq!(stable_hash_string(&a).unwrap(), stable_hash_string(&b).unwrap());
    }
}
