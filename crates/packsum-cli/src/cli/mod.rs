//! CLI for the packsum checksum tool.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config;
use commands::{run_execute, run_manifest, run_validate};

/// Top-level CLI for the packsum checksum tool.
#[derive(Debug, Parser)]
#[command(name = "packsum")]
#[command(about = "packsum: SHA1 checksums for Coda-hosted files", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Run the Checksum formula against a hosted file URL.
    Execute {
        /// URL of a file or image that has been uploaded to Coda.
        url: String,
    },

    /// Check a URL against the trusted-host allow-list without fetching.
    Validate {
        /// URL to check.
        url: String,
    },

    /// Print the formula manifest as JSON.
    Manifest,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Execute { url } => run_execute(&cfg, &url).await?,
            CliCommand::Validate { url } => run_validate(&url)?,
            CliCommand::Manifest => run_manifest()?,
        }

        Ok(())
    }
}
