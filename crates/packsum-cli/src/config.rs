//! Host-side configuration for the local harness.
//!
//! The formula itself reads no configuration: timeouts and the response-size
//! ceiling belong to the host environment, which is what this crate stands
//! in for.

use anyhow::Result;
use packsum_core::fetcher::CONTENT_SIZE_LIMIT_BYTES;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Limits for the local fetch capability, loaded from
/// `~/.config/packsum/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostConfig {
    /// Total transfer timeout in seconds.
    pub timeout_secs: u64,
    /// Connection establishment timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Response-size ceiling in bytes; transfers are aborted past it.
    pub max_content_bytes: u64,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            connect_timeout_secs: 15,
            max_content_bytes: CONTENT_SIZE_LIMIT_BYTES,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("packsum")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<HostConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = HostConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: HostConfig = toml::from_str(&data)?;
    Ok(cfg)
}
