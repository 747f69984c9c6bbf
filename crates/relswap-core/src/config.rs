use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::release::ReleaseSource;
use crate::transport::{TransferOptions, DEFAULT_USER_AGENT};

/// Global configuration loaded from `~/.config/relswap/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelswapConfig {
    /// Releases API root.
    pub api_base_url: String,
    /// Repository owner releases are looked up under.
    pub owner: String,
    /// Repository name releases are looked up under.
    pub repo: String,
    /// Optional proxy endpoint for every request (e.g. "http://proxy:3128").
    #[serde(default)]
    pub http_proxy: Option<String>,
    /// Optional curl receive buffer size in bytes (None = libcurl default).
    #[serde(default)]
    pub receive_buffer_bytes: Option<usize>,
    /// Optional connect timeout in seconds. No overall transfer timeout is applied.
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
    /// Optional override of the User-Agent header.
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for RelswapConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.github.com".to_string(),
            owner: "relswap".to_string(),
            repo: "relswap".to_string(),
            http_proxy: None,
            receive_buffer_bytes: None,
            connect_timeout_secs: None,
            user_agent: None,
        }
    }
}

impl RelswapConfig {
    pub fn release_source(&self) -> ReleaseSource {
        ReleaseSource::new(&self.api_base_url, &self.owner, &self.repo)
    }

    pub fn transfer_options(&self) -> TransferOptions {
        TransferOptions {
            user_agent: self
                .user_agent
                .clone()
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            receive_buffer_bytes: self.receive_buffer_bytes,
            connect_timeout: self.connect_timeout_secs.map(Duration::from_secs),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("relswap")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<RelswapConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = RelswapConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: RelswapConfig = toml::from_str(&data)?;
    Ok(cfg)
}
