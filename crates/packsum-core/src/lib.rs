//! Packsum core: the Checksum formula (reference validation, fetch through a
//! host-injected capability, SHA1 digest) and its host declaration metadata.

pub mod allowlist;
pub mod digest;
pub mod error;
pub mod fetcher;
pub mod formula;
pub mod manifest;
