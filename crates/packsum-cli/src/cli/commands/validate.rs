//! Validate command: check a URL against the trusted-host allow-list.

use anyhow::Result;
use packsum_core::allowlist;
use url::Url;

/// Report whether the URL would be accepted by the Checksum formula.
///
/// Rejection is an answer, not a failure, so this always returns Ok.
pub fn run_validate(url: &str) -> Result<()> {
    match allowlist::validate_reference(Some(url)) {
        Ok(trusted) => match parsed_host(trusted) {
            Some(host) => println!("trusted: {} (host {})", trusted, host),
            None => println!("trusted: {}", trusted),
        },
        Err(err) => println!("rejected: {}", err),
    }
    Ok(())
}

/// Best-effort host display. The allow-list patterns admit hosts the URL
/// parser refuses, so a parse failure here must not fail the command.
fn parsed_host(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_owned))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsed_host_extracts_the_host() {
        assert_eq!(
            parsed_host("https://foo.codahosted.io/x").as_deref(),
            Some("foo.codahosted.io")
        );
    }

    #[test]
    fn verdicts_are_not_failures() {
        assert!(run_validate("https://codahosted.io/abc123").is_ok());
        assert!(run_validate("https://example.com/file.png").is_ok());
        assert!(run_validate("not a url").is_ok());
    }

    #[test]
    fn unparseable_trusted_host_still_gets_a_verdict() {
        // The patterns accept any non-slash host text, including characters
        // the URL parser refuses.
        let url = "https://my host.codahosted.io/x";
        assert!(allowlist::is_trusted_url(url));
        assert!(parsed_host(url).is_none());
        assert!(run_validate(url).is_ok());
    }
}
