//! User-visible failure taxonomy for the Checksum formula.
//!
//! Every variant is terminal for the current invocation; nothing is retried
//! or silently recovered. The host presents the `Display` text verbatim, so
//! each message is written for the end user, not for a log file.

use thiserror::Error;

/// A failed formula invocation.
#[derive(Debug, Clone, Error)]
pub enum FormulaError {
    /// No file reference was supplied (absent or empty parameter).
    #[error("Please provide a file or image that has been uploaded to Coda.")]
    MissingInput,

    /// The reference is plain text rather than an http(s) URL.
    #[error(
        "The value looks like plain text, not a file - please supply a file \
         or image that has been uploaded to Coda."
    )]
    NotAUrl,

    /// The URL's host matches neither trusted-host pattern.
    #[error(
        "Not compatible with text or Image URL columns - please supply an \
         image or file that has been uploaded to Coda."
    )]
    UntrustedHost,

    /// The host fetcher refused the response at its size ceiling.
    #[error("File is too large - only files up to 4 MB can be checksummed.")]
    FileTooLarge,

    /// Any other fetch failure; the underlying message is passed through.
    #[error("Failed to fetch the file: {message}")]
    FetchFailed { message: String },
}
