//! The host-injected fetch capability.
//!
//! The formula never performs network transport itself. The host supplies an
//! implementation of [`Fetcher`] and owns timeouts, redirects, rate limits,
//! and the response-size ceiling; the formula issues exactly one request per
//! invocation and treats the capability as opaque.

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Response-size ceiling the production host enforces on fetched content.
pub const CONTENT_SIZE_LIMIT_BYTES: u64 = 4 * 1024 * 1024;

/// HTTP method of a capability request. The Checksum formula only issues GET.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMethod {
    Get,
}

impl fmt::Display for FetchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchMethod::Get => write!(f, "GET"),
        }
    }
}

/// A single request handed to the fetch capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub method: FetchMethod,
    pub url: String,
    /// Request the body as raw bytes, with no text decoding.
    pub binary_response: bool,
}

impl FetchRequest {
    /// A binary GET for `url`.
    pub fn get_binary(url: impl Into<String>) -> Self {
        Self {
            method: FetchMethod::Get,
            url: url.into(),
            binary_response: true,
        }
    }
}

/// A successful response: the fully received binary payload.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    pub body: Vec<u8>,
}

/// A failure reported by the fetch capability.
///
/// The host exposes no structured error kind across this boundary, only a
/// human-readable message.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct FetchFailure {
    pub message: String,
}

impl FetchFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Host-provided ability to perform outbound HTTP requests.
///
/// Injected into the formula entry point so tests can substitute a double
/// returning canned bodies or synthetic failures. Implementations must be
/// `Send + Sync`; the formula performs no retries and no timeout management
/// on its side of the boundary.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse, FetchFailure>;
}
