//! SHA1 digest of an in-memory payload.

use sha1::{Digest, Sha1};

/// Computes the SHA1 digest of `data` and returns it as 40 lowercase hex
/// characters.
///
/// The whole buffer is hashed in one pass; fetched files are already
/// memory-resident, so there is no streaming variant.
pub fn sha1_hex(data: &[u8]) -> String {
    let mut hasher = Sha1::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}
