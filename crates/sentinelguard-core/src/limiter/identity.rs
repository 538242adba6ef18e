//! Client identity hashing

use std::fmt;

use sha2::{Digest, Sha256};

/// Opaque bucket key derived from a client address
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdentityKey(String);

impl IdentityKey {
    /// Hex digest backing this key
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Derive the rate-limit key for a raw client address.
///
/// SHA-256 keeps the mapping deterministic while the raw address never
/// reaches the limiter's table.
pub fn hash_identity(raw_address: &str) -> IdentityKey {
    let digest = Sha256::digest(raw_address.as_bytes());
    IdentityKey(hex::encode(digest))
}
