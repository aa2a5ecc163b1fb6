//! Identifier generation for task records.

use chrono::{DateTime, Utc};
use rand::Rng;
use sha2::{Digest, Sha256};

/// Record ID prefix.
const ID_PREFIX: &str = "tw-";

/// Generate a fresh record identifier.
///
/// Format: "tw-" + 12 hex chars of SHA256(text, creation time, 8 random
/// bytes). The random component keeps identical records created in the
/// same second from colliding.
pub fn generate_id(text: &str, created_at: DateTime<Utc>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hasher.update(created_at.timestamp().to_le_bytes());
    hasher.update(rand::rng().random::<[u8; 8]>());
    let digest = hasher.finalize();

    let mut id = String::with_capacity(ID_PREFIX.len() + 12);
    id.push_str(ID_PREFIX);
    for byte in &digest[..6] {
        id.push_str(&format!("{:02x}", byte));
    }
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_id_shape() {
        let id = generate_id("call bob", Utc::now());
        assert!(id.starts_with("tw-"));
        assert_eq!(id.len(), 15);
        assert!(id[3..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_same_inputs_distinct_ids() {
        let now = Utc::now();
        let first = generate_id("same text", now);
        let second = generate_id("same text", now);
        assert_ne!(first, second);
    }

    #[test]
    fn test_never_empty() {
        assert!(!generate_id("", Utc::now()).is_empty());
    }
}
