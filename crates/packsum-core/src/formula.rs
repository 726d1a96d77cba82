//! The Checksum formula: validate, fetch, digest.
//!
//! One invocation is a single pass through the pipeline. Every failure is
//! terminal and user-visible; there is no partial output. The fetch await is
//! the only suspension point, and invocations share no mutable state, so any
//! number may run concurrently without coordination.

use crate::allowlist;
use crate::digest;
use crate::error::FormulaError;
use crate::fetcher::{FetchFailure, FetchRequest, Fetcher};

/// Executes the Checksum formula over `file` using the host's fetcher.
///
/// `file` is the formula's single parameter: a reference to a file or image
/// uploaded to Coda. On success, returns the SHA1 digest of the fetched
/// bytes as a 40-character lowercase hex string. Identical remote content
/// always yields an identical digest.
pub async fn execute(fetcher: &dyn Fetcher, file: Option<&str>) -> Result<String, FormulaError> {
    let url = allowlist::validate_reference(file)?;

    tracing::debug!("fetching file content from {}", url);
    let response = fetcher
        .fetch(FetchRequest::get_binary(url))
        .await
        .map_err(map_fetch_failure)?;

    tracing::debug!("hashing {} fetched bytes", response.body.len());
    Ok(digest::sha1_hex(&response.body))
}

/// Maps a capability failure onto the user-visible taxonomy.
///
/// The size ceiling is only visible in the host's message text; there is no
/// structured error kind for it, so the match is on the words "content size".
fn map_fetch_failure(failure: FetchFailure) -> FormulaError {
    if failure.message.to_ascii_lowercase().contains("content size") {
        FormulaError::FileTooLarge
    } else {
        FormulaError::FetchFailed {
            message: failure.message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::{FetchMethod, FetchResponse};
    use std::sync::Mutex;

    const HOSTED_URL: &str = "https://codahosted.io/docs/123/blobs/abc123";

    /// Test double for the host fetcher: canned body or synthetic failure,
    /// recording every request it receives.
    struct StubFetcher {
        result: Result<Vec<u8>, String>,
        requests: Mutex<Vec<FetchRequest>>,
    }

    impl StubFetcher {
        fn body(bytes: &[u8]) -> Self {
            Self {
                result: Ok(bytes.to_vec()),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn failure(message: &str) -> Self {
            Self {
                result: Err(message.to_string()),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<FetchRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl Fetcher for StubFetcher {
        async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse, FetchFailure> {
            self.requests.lock().unwrap().push(request);
            match &self.result {
                Ok(body) => Ok(FetchResponse { body: body.clone() }),
                Err(message) => Err(FetchFailure::new(message.clone())),
            }
        }
    }

    #[tokio::test]
    async fn absent_input_is_missing_input() {
        let fetcher = StubFetcher::body(b"abc");
        let err = execute(&fetcher, None).await.unwrap_err();
        assert!(matches!(err, FormulaError::MissingInput));
        assert!(fetcher.requests().is_empty());
    }

    #[tokio::test]
    async fn empty_input_is_missing_input() {
        let fetcher = StubFetcher::body(b"abc");
        for input in ["", "   "] {
            let err = execute(&fetcher, Some(input)).await.unwrap_err();
            assert!(matches!(err, FormulaError::MissingInput));
        }
        assert!(fetcher.requests().is_empty());
    }

    #[tokio::test]
    async fn plain_text_is_not_a_url() {
        let fetcher = StubFetcher::body(b"abc");
        let err = execute(&fetcher, Some("hello.png")).await.unwrap_err();
        assert!(matches!(err, FormulaError::NotAUrl));
        assert!(fetcher.requests().is_empty());
    }

    #[tokio::test]
    async fn unknown_host_is_untrusted() {
        let fetcher = StubFetcher::body(b"abc");
        let err = execute(&fetcher, Some("https://example.com/file.png"))
            .await
            .unwrap_err();
        assert!(matches!(err, FormulaError::UntrustedHost));
        assert!(fetcher.requests().is_empty());
    }

    #[tokio::test]
    async fn hosted_file_is_fetched_and_digested() {
        let fetcher = StubFetcher::body(b"abc");
        let digest = execute(&fetcher, Some(HOSTED_URL)).await.unwrap();
        assert_eq!(digest, "a9993e364706816aba3e25717850c26c9cd0d89d");
    }

    #[tokio::test]
    async fn empty_body_digests_to_empty_sha1() {
        let fetcher = StubFetcher::body(b"");
        let digest = execute(&fetcher, Some(HOSTED_URL)).await.unwrap();
        assert_eq!(digest, "da39a3ee5e6b4b0d3255bfef95601890afd80709");
    }

    #[tokio::test]
    async fn resized_image_url_is_fetched() {
        let fetcher = StubFetcher::body(b"png bytes");
        let url = "https://foo.codaio.imgix.net/abc123";
        execute(&fetcher, Some(url)).await.unwrap();

        let requests = fetcher.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, url);
    }

    #[tokio::test]
    async fn request_is_a_binary_get_for_the_trimmed_url() {
        let fetcher = StubFetcher::body(b"abc");
        execute(&fetcher, Some("  https://codahosted.io/abc123 "))
            .await
            .unwrap();

        let requests = fetcher.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, FetchMethod::Get);
        assert_eq!(requests[0].url, "https://codahosted.io/abc123");
        assert!(requests[0].binary_response);
    }

    #[tokio::test]
    async fn repeated_invocations_yield_the_same_digest() {
        let fetcher = StubFetcher::body(b"stable content");
        let first = execute(&fetcher, Some(HOSTED_URL)).await.unwrap();
        let second = execute(&fetcher, Some(HOSTED_URL)).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn content_size_failure_is_file_too_large() {
        let fetcher = StubFetcher::failure("Content Size exceeded the limit");
        let err = execute(&fetcher, Some(HOSTED_URL)).await.unwrap_err();
        assert!(matches!(err, FormulaError::FileTooLarge));
        assert!(format!("{err}").contains("4 MB"));
    }

    #[tokio::test]
    async fn other_fetch_failures_pass_the_message_through() {
        let fetcher = StubFetcher::failure("timeout");
        let err = execute(&fetcher, Some(HOSTED_URL)).await.unwrap_err();
        match err {
            FormulaError::FetchFailed { ref message } => assert_eq!(message, "timeout"),
            other => panic!("expected FetchFailed, got {other:?}"),
        }
        assert!(format!("{err}").contains("timeout"));
    }

    #[test]
    fn map_fetch_failure_matches_content_size_case_insensitively() {
        for message in ["content size too big", "CONTENT SIZE", "Content Size over 4MB"] {
            assert!(matches!(
                map_fetch_failure(FetchFailure::new(message)),
                FormulaError::FileTooLarge
            ));
        }
    }

    #[test]
    fn map_fetch_failure_passes_other_messages_through() {
        let err = map_fetch_failure(FetchFailure::new("HTTP 404"));
        assert!(matches!(err, FormulaError::FetchFailed { .. }));
    }
}
