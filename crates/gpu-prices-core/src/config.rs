use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{GpuError, Result};
use crate::normalize::NormalizePolicy;

pub const FIRECRAWL_API_URL: &str = "https://api.firecrawl.dev";

/// User configuration, read from `config.toml`. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub normalize: NormalizePolicy,
    pub update: UpdateSettings,
    pub firecrawl: FirecrawlSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UpdateSettings {
    /// Pause between providers so the scraping service isn't hammered.
    pub delay_ms: u64,
    /// A provider scraped longer ago than this is due for an update.
    pub stale_after_hours: u64,
}

impl Default for UpdateSettings {
    fn default() -> Self {
        Self {
            delay_ms: 1000,
            stale_after_hours: 24,
        }
    }
}

impl UpdateSettings {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn stale_after(&self) -> chrono::Duration {
        chrono::Duration::hours(self.stale_after_hours as i64)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FirecrawlSettings {
    pub api_url: String,
    /// Falls back to `$FIRECRAWL_API_KEY` when unset.
    pub api_key: Option<String>,
    /// How long the service waits for the page to render.
    pub wait_for_ms: u64,
    pub timeout_secs: u64,
}

impl Default for FirecrawlSettings {
    fn default() -> Self {
        Self {
            api_url: FIRECRAWL_API_URL.to_string(),
            api_key: None,
            wait_for_ms: 5000,
            timeout_secs: 30,
        }
    }
}

impl FirecrawlSettings {
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| std::env::var("FIRECRAWL_API_KEY").ok())
            .filter(|k| !k.trim().is_empty())
    }
}

impl Config {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| GpuError::Io(format!("failed to read {}: {e}", path.display())))?;
        parse_config(&content)
    }

    /// Load the user config if one exists, otherwise defaults.
    #[cfg(feature = "network")]
    pub fn load_default() -> Result<Self> {
        match crate::cache::config_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }
}

/// Parse config from a TOML string.
pub fn parse_config(toml_str: &str) -> Result<Config> {
    let mut cfg: Config =
        toml::from_str(toml_str).map_err(|e| GpuError::Config(format!("bad config.toml: {e}")))?;
    cfg.normalize = cfg.normalize.sanitized();
    Ok(cfg)
}
