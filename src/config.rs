//! Application configuration with layered loading
//!
//! Precedence (highest wins):
//! 1. Environment variables (`CINESEARCH_*`)
//! 2. TOML file named by `CINESEARCH_CONFIG_FILE`, if set
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default OMDb endpoint
pub const DEFAULT_BASE_URL: &str = "https://www.omdbapi.com/";

/// Configuration loading and validation errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },

    #[error("missing required configuration: {field} ({hint})")]
    Missing { field: String, hint: String },
}

/// Runtime configuration for the search client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// OMDb API key, set via `CINESEARCH_API_KEY`
    #[serde(default)]
    pub api_key: Option<String>,

    /// OMDb base URL, set via `CINESEARCH_BASE_URL`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Directory holding persisted state; the XDG cache dir when unset
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,

    /// HTTP request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

/// Rejects a missing or blank API key; only requests that hit the network call this
pub fn require_api_key(api_key: Option<&str>) -> Result<&str, ConfigError> {
    api_key
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| ConfigError::Missing {
            field: "api_key".into(),
            hint: "Set CINESEARCH_API_KEY environment variable".into(),
        })
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.into()
}

fn default_timeout_ms() -> u64 {
    10_000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            cache_dir: None,
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl AppConfig {
    /// Load configuration from all sources and validate it
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("CINESEARCH_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(Env::prefixed("CINESEARCH_").ignore(&["config_file"]));

        let config: Self = figment
            .extract()
            .map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Timeout as a `Duration` for reqwest
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Resolve the state directory, falling back to `~/.cache/cinesearch/`
    pub fn resolved_cache_dir(&self) -> Option<PathBuf> {
        self.cache_dir.clone().or_else(|| {
            ProjectDirs::from("", "", "cinesearch").map(|dirs| dirs.cache_dir().to_path_buf())
        })
    }

    /// Check loaded values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_ms < 100 || self.timeout_ms > 120_000 {
            return Err(ConfigError::Invalid {
                field: "timeout_ms".into(),
                reason: "must be between 100 and 120000".into(),
            });
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ConfigError::Invalid {
                field: "base_url".into(),
                reason: "must be an http(s) URL".into(),
            });
        }

        Ok(())
    }
}
