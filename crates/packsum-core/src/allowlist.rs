//! Trusted-host validation for file references.
//!
//! A reference is fetchable only when it is an http(s) URL whose host is part
//! of Coda's content platform: the primary hosted-file domain or the
//! image-resizing domain. The allow-list is two fixed patterns; it is not
//! configurable at runtime.

use crate::error::FormulaError;
use once_cell::sync::Lazy;
use regex::Regex;

/// Primary content host serving file and image attachments uploaded to a doc.
pub const HOSTED_FILE_DOMAIN: &str = "codahosted.io";

/// Secondary host serving resized renditions of uploaded images.
pub const RESIZED_IMAGE_DOMAIN: &str = "codaio.imgix.net";

/// Matches hosted-file URLs, bare host or any subdomain.
static HOSTED_FILE_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https://([^/]*\.)?codahosted\.io/.*$")
        .expect("hosted-file pattern is a fixed literal and should compile")
});

/// Matches resized-image URLs, bare host or any subdomain.
static RESIZED_IMAGE_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https://([^/]*\.)?codaio\.imgix\.net/.*$")
        .expect("resized-image pattern is a fixed literal and should compile")
});

/// True if `url` matches either trusted-host pattern.
pub fn is_trusted_url(url: &str) -> bool {
    HOSTED_FILE_URL.is_match(url) || RESIZED_IMAGE_URL.is_match(url)
}

/// Validates a raw file reference and returns the URL to fetch.
///
/// Checks run in order and each failure is terminal: missing input, then URL
/// shape, then the trusted-host allow-list. Surrounding whitespace does not
/// count as input.
pub fn validate_reference(file: Option<&str>) -> Result<&str, FormulaError> {
    let url = file.map(str::trim).unwrap_or_default();
    if url.is_empty() {
        return Err(FormulaError::MissingInput);
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(FormulaError::NotAUrl);
    }
    if !is_trusted_url(url) {
        tracing::debug!("reference host is not on the allow-list: {}", url);
        return Err(FormulaError::UntrustedHost);
    }
    Ok(url)
}
