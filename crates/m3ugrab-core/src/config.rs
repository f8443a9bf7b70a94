use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::retry::RetryPolicy;

/// Default browser-like User-Agent; many channel pages refuse plain clients.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/115.0 Safari/537.36";

/// Retry policy parameters (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of fetch attempts per channel (including the first).
    pub max_attempts: u32,
    /// Base delay in seconds for exponential backoff (e.g. 0.5 = 500ms).
    pub base_delay_secs: f64,
    /// Maximum backoff delay in seconds.
    pub max_delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_secs: 0.5,
            max_delay_secs: 30,
        }
    }
}

impl RetryConfig {
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            base_delay: Duration::from_secs_f64(self.base_delay_secs.max(0.0)),
            max_delay: Duration::from_secs(self.max_delay_secs),
        }
    }
}

/// Global configuration loaded from `~/.config/m3ugrab/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrabConfig {
    /// Total timeout per page fetch, in seconds.
    pub timeout_secs: u64,
    /// Connect timeout per page fetch, in seconds.
    pub connect_timeout_secs: u64,
    /// Number of concurrent resolution workers (1 = sequential).
    pub workers: usize,
    /// User-Agent header sent with page fetches.
    pub user_agent: String,
    /// Optional stream URL substituted for channels that fail to resolve.
    /// None (the default) means failed channels produce no playlist entry.
    #[serde(default)]
    pub fallback_url: Option<String>,
    /// Optional EPG URL rendered as `x-tvg-url` on the `#EXTM3U` header line.
    #[serde(default)]
    pub epg_url: Option<String>,
    /// Optional retry policy; if missing, built-in defaults are used.
    #[serde(default)]
    pub retry: Option<RetryConfig>,
}

impl Default for GrabConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 15,
            connect_timeout_secs: 15,
            workers: 4,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            fallback_url: None,
            epg_url: None,
            retry: None,
        }
    }
}

impl GrabConfig {
    /// Effective retry policy: the `[retry]` section if present, else defaults.
    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
            .as_ref()
            .map(RetryConfig::policy)
            .unwrap_or_default()
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("m3ugrab")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<GrabConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = GrabConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: GrabConfig = toml::from_str(&data)?;
    Ok(cfg)
}
