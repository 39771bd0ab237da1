//! Query hashing for cache keys.

use sha2::{Digest, Sha256};

/// SHA-256 hex digest of a query string. Deterministic; used as the cache
/// and feedback key for a question.
pub fn query_hash(query: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(query.as_bytes());
    hex::encode(hasher.finalize())
}
