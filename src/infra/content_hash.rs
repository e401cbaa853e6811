//! Content hashing for naming rendered diagrams.

use sha2::{Digest, Sha256};

/// SHA256 hash of diagram source text.
///
/// Identical diagrams hash identically, so each distinct diagram in a
/// document is rendered once no matter how often it appears.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentHash {
    hex: String,
}

impl ContentHash {
    /// Length of the prefix returned by [`ContentHash::short`].
    pub const SHORT_LEN: usize = 12;

    /// Computes a SHA256 hash of the given bytes.
    pub fn compute(bytes: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        let result = hasher.finalize();
        Self {
            hex: format!("{:x}", result),
        }
    }

    /// Returns a prefix short enough for file names.
    pub fn short(&self) -> &str {
        &self.hex[..Self::SHORT_LEN]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_hash_from_empty_bytes() {
        let hash = ContentHash::compute(&[]);
        assert_eq!(
            hash.hex,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn content_hash_from_known_content() {
        let hash = ContentHash::compute(b"hello world");
        assert_eq!(
            hash.hex,
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn short_is_a_prefix() {
        let hash = ContentHash::compute(b"hello world");
        assert_eq!(hash.short(), "b94d27b9934d");
        assert!(hash.hex.starts_with(hash.short()));
    }

    #[test]
    fn same_diagram_same_hash() {
        let a = ContentHash::compute(b"graph TD; A-->B");
        let b = ContentHash::compute(b"graph TD; A-->B");
        let c = ContentHash::compute(b"graph TD; A-->C");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
