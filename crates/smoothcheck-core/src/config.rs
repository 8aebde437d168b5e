use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::probe::ProbeOptions;
use crate::retry::RetryPolicy;
use crate::verify::{default_parallelism, VerifyOptions};

/// Retry policy parameters (optional section in config.toml).
///
/// The default budget is a single attempt: one probe result is authoritative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts per probe (including the first).
    pub max_attempts: u32,
    /// Base delay in seconds for exponential backoff.
    pub base_delay_secs: f64,
    /// Maximum backoff delay in seconds.
    pub max_delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 1,
            base_delay_secs: 1.0,
            max_delay_secs: 30,
        }
    }
}

impl RetryConfig {
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts.max(1),
            base_delay: Duration::from_secs_f64(self.base_delay_secs.max(0.0)),
            max_delay: Duration::from_secs(self.max_delay_secs),
        }
    }
}

/// Checker configuration loaded from `~/.config/smoothcheck/config.toml`.
///
/// Passed explicitly into the loader and verification engine; there is no
/// ambient global state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckerConfig {
    /// Probe worker pool size per (track, quality) pair.
    #[serde(default = "default_parallelism")]
    pub parallel_probes: usize,
    /// Connect timeout per probe, in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Total request timeout per probe, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Optional retry policy; if missing, a single attempt is made.
    #[serde(default)]
    pub retry: Option<RetryConfig>,
}

fn default_connect_timeout_secs() -> u64 {
    15
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            parallel_probes: default_parallelism(),
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            retry: None,
        }
    }
}

impl CheckerConfig {
    /// Builds the per-run verification options from this config.
    pub fn verify_options(&self) -> VerifyOptions {
        VerifyOptions {
            parallel_probes: self.parallel_probes.max(1),
            probe: ProbeOptions {
                connect_timeout: Duration::from_secs(self.connect_timeout_secs),
                request_timeout: Duration::from_secs(self.request_timeout_secs),
            },
            retry: self
                .retry
                .as_ref()
                .map(RetryConfig::policy)
                .unwrap_or_default(),
        }
    }
}

/// XDG prefix shared by the config file and the log file.
pub const XDG_PREFIX: &str = "smoothcheck";

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix(XDG_PREFIX)?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<CheckerConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = CheckerConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: CheckerConfig = toml::from_str(&data)?;
    Ok(cfg)
}
