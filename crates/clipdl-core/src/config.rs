use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Retry policy parameters (optional section in config.toml).
///
/// Retries apply to the fetch phase only; a transcode is attempted once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of fetch attempts per task (including the first).
    pub max_attempts: u32,
    /// Fixed delay in seconds between fetch attempts (0 = retry immediately).
    pub delay_secs: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            delay_secs: 0.0,
        }
    }
}

/// Global configuration loaded from `~/.config/clipdl/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClipdlConfig {
    /// Optional retry policy; if missing, built-in defaults are used.
    #[serde(default)]
    pub retry: Option<RetryConfig>,
    /// Optional wall-clock limit in seconds for each fetch or transcode
    /// subprocess (None = wait indefinitely). A task whose subprocess hits
    /// the limit fails; it is not retried.
    #[serde(default)]
    pub phase_timeout_secs: Option<u64>,
    /// Exit non-zero when any task fails. Defaults to false: a completed
    /// run reports per-task failures in its status output instead.
    #[serde(default)]
    pub fail_on_error: bool,
}

impl Default for ClipdlConfig {
    fn default() -> Self {
        Self {
            retry: None,
            phase_timeout_secs: None,
            fail_on_error: false,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("clipdl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ClipdlConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = ClipdlConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: ClipdlConfig = toml::from_str(&data)?;
    Ok(cfg)
}
