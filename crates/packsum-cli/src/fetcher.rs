//! Local fetch capability backed by libcurl.
//!
//! Stands in for the production host: it owns redirects, timeouts, and the
//! response-size ceiling. libcurl is blocking, so transfers run on tokio's
//! blocking pool behind the async [`Fetcher`] trait. Bodies are always
//! returned as raw bytes, so `binary_response` needs no special handling.

use async_trait::async_trait;
use curl::easy::Easy;
use packsum_core::fetcher::{FetchFailure, FetchMethod, FetchRequest, FetchResponse, Fetcher};
use std::time::Duration;

use crate::config::HostConfig;

/// Curl-backed [`Fetcher`] with host-owned limits.
#[derive(Debug, Clone)]
pub struct CurlFetcher {
    timeout: Duration,
    connect_timeout: Duration,
    max_content_bytes: u64,
}

impl CurlFetcher {
    pub fn new(config: &HostConfig) -> Self {
        Self {
            timeout: Duration::from_secs(config.timeout_secs),
            connect_timeout: Duration::from_secs(config.connect_timeout_secs),
            max_content_bytes: config.max_content_bytes,
        }
    }

    fn apply_request(&self, easy: &mut Easy, request: &FetchRequest) -> Result<(), curl::Error> {
        easy.url(&request.url)?;
        match request.method {
            FetchMethod::Get => easy.get(true)?,
        }
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.timeout(self.timeout)?;
        Ok(())
    }

    /// Performs the transfer on the current thread. Call from
    /// `spawn_blocking` when used from async code.
    fn fetch_blocking(&self, request: &FetchRequest) -> Result<FetchResponse, FetchFailure> {
        tracing::debug!(
            "{} {} (binary: {})",
            request.method,
            request.url,
            request.binary_response
        );

        let mut easy = Easy::new();
        self.apply_request(&mut easy, request).map_err(curl_failure)?;

        let max = self.max_content_bytes;
        let mut body: Vec<u8> = Vec::new();
        let mut oversized = false;
        let performed = {
            let mut transfer = easy.transfer();
            transfer
                .write_function(|data| {
                    if !append_within_limit(&mut body, data, max) {
                        oversized = true;
                        return Ok(0); // abort transfer
                    }
                    Ok(data.len())
                })
                .map_err(curl_failure)?;
            transfer.perform()
        };

        // The abort above surfaces as a curl write error; report the ceiling
        // instead of the transport detail.
        if oversized {
            return Err(size_limit_failure(max));
        }
        performed.map_err(curl_failure)?;

        let code = easy.response_code().map_err(curl_failure)?;
        if !(200..300).contains(&code) {
            return Err(FetchFailure::new(format!(
                "GET {} returned HTTP {}",
                request.url, code
            )));
        }

        tracing::debug!("received {} bytes from {}", body.len(), request.url);
        Ok(FetchResponse { body })
    }
}

#[async_trait]
impl Fetcher for CurlFetcher {
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse, FetchFailure> {
        let fetcher = self.clone();
        tokio::task::spawn_blocking(move || fetcher.fetch_blocking(&request))
            .await
            .map_err(|e| FetchFailure::new(format!("fetch task failed: {e}")))?
    }
}

/// Appends `chunk` to `body` unless the total would pass `max` bytes.
fn append_within_limit(body: &mut Vec<u8>, chunk: &[u8], max: u64) -> bool {
    if body.len() as u64 + chunk.len() as u64 > max {
        return false;
    }
    body.extend_from_slice(chunk);
    true
}

/// Failure for a transfer aborted at the size ceiling. The wording is
/// load-bearing: the formula recognizes the ceiling by the words
/// "content size" in this message.
fn size_limit_failure(max: u64) -> FetchFailure {
    FetchFailure::new(format!("content size exceeds the {} byte limit", max))
}

fn curl_failure(e: curl::Error) -> FetchFailure {
    FetchFailure::new(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use packsum_core::error::FormulaError;
    use packsum_core::fetcher::CONTENT_SIZE_LIMIT_BYTES;
    use packsum_core::formula;

    #[test]
    fn append_within_limit_accepts_up_to_max() {
        let mut body = Vec::new();
        assert!(append_within_limit(&mut body, &[0u8; 3], 4));
        assert!(append_within_limit(&mut body, &[0u8; 1], 4));
        assert_eq!(body.len(), 4);
    }

    #[test]
    fn append_within_limit_rejects_past_max() {
        let mut body = vec![0u8; 4];
        assert!(!append_within_limit(&mut body, &[0u8; 1], 4));
        // The rejected chunk must not be partially appended.
        assert_eq!(body.len(), 4);
    }

    #[test]
    fn size_limit_failure_mentions_content_size() {
        let failure = size_limit_failure(CONTENT_SIZE_LIMIT_BYTES);
        assert!(failure.message.contains("content size"));
        assert!(failure.message.contains("4194304"));
    }

    /// Fetcher double that always reports the given failure.
    struct FailingFetcher(FetchFailure);

    #[async_trait]
    impl Fetcher for FailingFetcher {
        async fn fetch(&self, _request: FetchRequest) -> Result<FetchResponse, FetchFailure> {
            Err(self.0.clone())
        }
    }

    /// Pins the cross-crate message contract: the ceiling message produced
    /// here must be recognized by the formula as the size-limit failure.
    #[tokio::test]
    async fn ceiling_message_maps_to_file_too_large() {
        let fetcher = FailingFetcher(size_limit_failure(CONTENT_SIZE_LIMIT_BYTES));
        let err = formula::execute(&fetcher, Some("https://codahosted.io/abc"))
            .await
            .unwrap_err();
        assert!(matches!(err, FormulaError::FileTooLarge));
    }
}
