//! # Configuration Utilities
//!
//! Configuration structures for the steganography web service and the generic
//! TOML loader they are read with.
//!
//! Every field has a default, so a partial file (or no file at all) is valid.

use anyhow::{anyhow, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Load a TOML configuration file and deserialize it into the specified type.
///
/// # Arguments
/// - `path`: Path to the TOML configuration file
///
/// # Returns
/// - `Ok(T)`: Successfully loaded and parsed configuration
/// - `Err`: File I/O or parsing error
///
/// # Example
/// ```ignore
/// let config: ServiceConfig = load_config("config/server.toml")?;
/// ```
pub fn load_config<T>(path: &str) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    let content = fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Complete service configuration.
///
/// # Example TOML
///
/// ```toml
/// [server]
/// address = "0.0.0.0:5000"
/// max_upload_bytes = 10485760
///
/// [web]
/// static_dir = "static"
/// index_file = "index.html"
/// cors_permissive = true
///
/// [logging]
/// level = "info"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub server: ServerInfo,
    pub web: WebConfig,
    pub logging: LoggingConfig,
}

impl ServiceConfig {
    /// Load from `path` when given, otherwise fall back to the defaults.
    pub fn load(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => load_config(path),
            None => Ok(Self::default()),
        }
    }
}

/// Listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerInfo {
    /// Socket address to bind (e.g., "0.0.0.0:5000")
    pub address: String,
    /// Largest accepted request body, in bytes
    pub max_upload_bytes: usize,
}

impl Default for ServerInfo {
    fn default() -> Self {
        Self {
            address: "0.0.0.0:5000".to_string(),
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

/// Static page and browser-facing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    /// Directory served for any path not handled by the API
    pub static_dir: PathBuf,
    /// Page returned for `GET /`, relative to `static_dir`
    pub index_file: String,
    /// Attach a permissive CORS layer
    pub cors_permissive: bool,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            static_dir: PathBuf::from("static"),
            index_file: "index.html".to_string(),
            cors_permissive: true,
        }
    }
}

impl WebConfig {
    pub fn index_path(&self) -> PathBuf {
        self.static_dir.join(&self.index_file)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of "off", "error", "warn", "info", "debug", "trace"
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn level_filter(&self) -> Result<LevelFilter> {
        self.level
            .parse::<LevelFilter>()
            .map_err(|_| anyhow!("Invalid log level '{}'", self.level))
    }
}
