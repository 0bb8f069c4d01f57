//! Content hashing for conflict detection

use sha2::{Digest, Sha256};

/// SHA-256 of `content`, as lower-case hex
pub fn hash_content(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}
