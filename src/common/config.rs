//! Settings file handling
//!
//! Optional TOML file at the platform config dir; everything has a default
//! so the tool works out of the box against a local gateway. The run itself
//! never writes state anywhere.

use serde::Deserialize;
use std::path::PathBuf;

use super::{Error, Result};

/// Main settings structure
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Target service settings
    #[serde(default)]
    pub service: ServiceConfig,

    /// Admin credentials used for the login gate
    #[serde(default)]
    pub credentials: Credentials,

    /// Pacing between scenarios and purchase attempts
    #[serde(default)]
    pub pacing: Pacing,
}

/// Target service settings
#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    /// Base URL of the API gateway
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Timeout for the startup connectivity probe, in seconds
    #[serde(default = "default_probe_timeout")]
    pub probe_timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            probe_timeout_secs: default_probe_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_probe_timeout() -> u64 {
    5
}

/// Admin credentials
#[derive(Debug, Deserialize)]
pub struct Credentials {
    #[serde(default = "default_username")]
    pub username: String,

    #[serde(default = "default_password")]
    pub password: String,
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            username: default_username(),
            password: default_password(),
        }
    }
}

fn default_username() -> String {
    "admin".to_string()
}

fn default_password() -> String {
    "admin123".to_string()
}

/// Pacing settings in milliseconds
#[derive(Debug, Deserialize)]
pub struct Pacing {
    /// Pause between scenarios and between purchase attempts
    #[serde(default = "default_pace")]
    pub between_steps_ms: u64,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            between_steps_ms: default_pace(),
        }
    }
}

fn default_pace() -> u64 {
    1000
}

impl Config {
    /// Load settings from the default config file
    ///
    /// Returns default settings if the file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = config_path() {
            if path.exists() {
                let content = std::fs::read_to_string(&path).map_err(|e| {
                    Error::Config(format!("failed to read '{}': {}", path.display(), e))
                })?;
                return toml::from_str(&content).map_err(|e| Error::ConfigParse(e.to_string()));
            }
        }
        Ok(Self::default())
    }
}

/// Path to the settings file, if a config dir can be resolved
fn config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "vendflow")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}
