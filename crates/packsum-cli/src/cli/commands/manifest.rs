//! Manifest command: print the formula manifest as JSON.

use anyhow::{Context, Result};
use packsum_core::manifest;

/// Print the Checksum formula manifest as pretty JSON.
pub fn run_manifest() -> Result<()> {
    let manifest = manifest::manifest();
    let json = serde_json::to_string_pretty(&manifest).context("serializing manifest")?;
    println!("{}", json);
    Ok(())
}
