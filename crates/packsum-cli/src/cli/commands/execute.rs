//! Execute command: run the Checksum formula against a hosted file URL.

use anyhow::Result;
use packsum_core::formula;

use crate::config::HostConfig;
use crate::fetcher::CurlFetcher;

/// Run the formula with the curl-backed fetch capability and print the digest.
pub async fn run_execute(cfg: &HostConfig, url: &str) -> Result<()> {
    let fetcher = CurlFetcher::new(cfg);
    let digest = formula::execute(&fetcher, Some(url)).await?;
    println!("{}  {}", digest, url);
    Ok(())
}
