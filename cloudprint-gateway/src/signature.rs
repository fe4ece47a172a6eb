//! Per-request authentication signature
//!
//! The vendor authenticates each request with the SHA-1 digest of
//! `account ∥ secret ∥ timestamp`. A fresh seconds-resolution timestamp is
//! signed on every call, which bounds replay exposure to whatever timestamp
//! skew the vendor accepts.

use sha1::{Digest, Sha1};

/// Compute the request signature: lowercase hex SHA-1 of `user ∥ ukey ∥ stime`
///
/// Pure and deterministic; identical inputs always yield the same digest.
pub fn sign(user: &str, ukey: &str, stime: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(user.as_bytes());
    hasher.update(ukey.as_bytes());
    hasher.update(stime.as_bytes());
    hex::encode(hasher.finalize())
}
