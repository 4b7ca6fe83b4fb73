use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Retry policy parameters (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum attempts per unit, including the first.
    pub max_attempts: u32,
    /// Base delay in seconds for exponential backoff (e.g. 0.25 = 250ms).
    pub base_delay_secs: f64,
    /// Maximum backoff delay in seconds.
    pub max_delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay_secs: 0.25,
            max_delay_secs: 30,
        }
    }
}

/// Global configuration loaded from `~/.config/vodfetch/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VodfetchConfig {
    /// Canonical page URL guess; `{name}` is replaced with the job name.
    pub page_url_template: String,
    /// Search surface fetched when the canonical guess returns 404.
    pub search_url: String,
    /// User-Agent header sent on every request.
    pub user_agent: String,
    /// Muxer binary invoked on a completed workspace.
    pub ffmpeg_bin: String,
    /// Optional retry policy; built-in defaults when missing.
    #[serde(default)]
    pub retry: Option<RetryConfig>,
}

impl Default for VodfetchConfig {
    fn default() -> Self {
        Self {
            page_url_template: "https://streams.example.net/videos/{name}".to_string(),
            search_url: "https://streams.example.net/search".to_string(),
            user_agent: "Mozilla".to_string(),
            ffmpeg_bin: "ffmpeg".to_string(),
            retry: None,
        }
    }
}

impl VodfetchConfig {
    /// Canonical page URL for a job name.
    pub fn page_url(&self, name: &str) -> String {
        self.page_url_template.replace("{name}", name)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("vodfetch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<VodfetchConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = VodfetchConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: VodfetchConfig = toml::from_str(&data)?;
    Ok(cfg)
}
