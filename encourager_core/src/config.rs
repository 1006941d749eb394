//! Configuration file support for Encourager.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/encourager/config.toml`.
//! The `ALLOWED_ORIGIN` environment variable overrides `server.allowed_origin`.

use crate::{Error, Language, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Environment variable controlling the service's cross-origin policy
pub const ALLOWED_ORIGIN_ENV: &str = "ALLOWED_ORIGIN";

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub client: ClientConfig,
}

/// Verse lookup service configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: SocketAddr,

    /// `*` allows any origin; anything else is the single allowed origin
    #[serde(default = "default_allowed_origin")]
    pub allowed_origin: String,

    /// Custom JSON catalog to serve instead of the built-in one
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            allowed_origin: default_allowed_origin(),
            catalog_path: None,
        }
    }
}

/// Client configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Used when no language preference has been stored yet
    #[serde(default)]
    pub default_language: Language,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            data_dir: default_data_dir(),
            default_language: Language::default(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

// Default value functions
fn default_bind() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 5000))
}

fn default_allowed_origin() -> String {
    "*".into()
}

fn default_api_url() -> String {
    "http://127.0.0.1:5000".into()
}

fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));
    base.join("encourager")
}

fn default_timeout_secs() -> u64 {
    10
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        let mut config = if config_path.exists() {
            Self::load_from(&config_path)?
        } else {
            tracing::debug!("No config file found at {:?}, using defaults", config_path);
            Self::default()
        };
        config.apply_env();
        Ok(config)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Apply environment overrides
    pub fn apply_env(&mut self) {
        if let Ok(origin) = std::env::var(ALLOWED_ORIGIN_ENV) {
            if !origin.trim().is_empty() {
                self.server.allowed_origin = origin.trim().to_string();
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.client.timeout_secs == 0 {
            return Err(Error::Config("client.timeout_secs must be positive".into()));
        }
        if self.server.allowed_origin.trim().is_empty() {
            return Err(Error::Config("server.allowed_origin must not be empty".into()));
        }
        Ok(())
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."));
        base.join("encourager").join("config.toml")
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}
