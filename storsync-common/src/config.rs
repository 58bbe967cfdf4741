//! Configuration loading and config file resolution
//!
//! Config file resolution priority order:
//! 1. Command-line argument (highest priority)
//! 2. `STORSYNC_CONFIG` environment variable
//! 3. User config file (`~/.config/storsync/storsync.toml`)
//! 4. System config file (`/etc/storsync/storsync.toml`)
//!
//! Passwords may additionally be supplied through `STORSYNC_SOURCE_PASSWORD`
//! and `STORSYNC_CATALOG_PASSWORD`, which take precedence over the file.

use crate::{Error, Result};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "STORSYNC_CONFIG";

/// Environment variable overriding `[source] password`
pub const SOURCE_PASSWORD_ENV_VAR: &str = "STORSYNC_SOURCE_PASSWORD";

/// Environment variable overriding `[catalog] password`
pub const CATALOG_PASSWORD_ENV_VAR: &str = "STORSYNC_CATALOG_PASSWORD";

const CONFIG_FILE_NAME: &str = "storsync.toml";

/// Complete configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct TomlConfig {
    /// Storage Manager (source inventory) endpoint
    pub source: EndpointConfig,

    /// Asset catalog (upload target) endpoint
    pub catalog: EndpointConfig,

    /// HTTP client settings shared by both endpoints
    #[serde(default)]
    pub http: HttpConfig,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Base URI and credentials for one remote API
#[derive(Clone, Deserialize)]
pub struct EndpointConfig {
    /// Base URI, without trailing slash (e.g. `https://dsm:3033/api/rest`)
    pub base_uri: String,
    pub username: String,
    pub password: String,

    /// Value sent in the `x-dell-api-version` header (source endpoint only)
    #[serde(default = "default_api_version")]
    pub api_version: String,
}

impl fmt::Debug for EndpointConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EndpointConfig")
            .field("base_uri", &self.base_uri)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("api_version", &self.api_version)
            .finish()
    }
}

impl EndpointConfig {
    /// Join `path` onto the base URI, tolerating a trailing slash on the base
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_uri.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// HTTP client settings
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Accept self-signed certificates (Storage Manager ships with one)
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            accept_invalid_certs: false,
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_api_version() -> String {
    "3.1".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

impl TomlConfig {
    /// Parse configuration from TOML text and validate it
    ///
    /// Environment overrides are not applied here; see [`TomlConfig::load`].
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: TomlConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Parse TOML failed: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file and apply password overrides from the environment
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Read config {} failed: {}", path.display(), e))
        })?;
        let mut config = Self::from_toml_str(&content)?;
        config.apply_env_overrides();
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Replace passwords with values from `STORSYNC_*_PASSWORD` when set and non-empty
    pub fn apply_env_overrides(&mut self) {
        if let Some(password) = non_empty_env(SOURCE_PASSWORD_ENV_VAR) {
            debug!("Source password taken from {}", SOURCE_PASSWORD_ENV_VAR);
            self.source.password = password;
        }
        if let Some(password) = non_empty_env(CATALOG_PASSWORD_ENV_VAR) {
            debug!("Catalog password taken from {}", CATALOG_PASSWORD_ENV_VAR);
            self.catalog.password = password;
        }
    }

    fn validate(&self) -> Result<()> {
        for (section, endpoint) in [("source", &self.source), ("catalog", &self.catalog)] {
            if endpoint.base_uri.trim().is_empty() {
                return Err(Error::InvalidInput(format!("[{}] base_uri is empty", section)));
            }
            if endpoint.username.trim().is_empty() {
                return Err(Error::InvalidInput(format!("[{}] username is empty", section)));
            }
        }
        if self.http.timeout_secs == 0 {
            return Err(Error::InvalidInput("[http] timeout_secs must be positive".to_string()));
        }
        Ok(())
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Resolve the config file path
///
/// An explicit path (CLI or environment) is returned as-is even if it does
/// not exist, so the subsequent load reports the real path. Default locations
/// are only returned when present.
pub fn resolve_config_path(cli_arg: Option<&Path>) -> Result<PathBuf> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return Ok(path.to_path_buf());
    }

    // Priority 2: Environment variable
    if let Some(path) = non_empty_env(CONFIG_ENV_VAR) {
        return Ok(PathBuf::from(path));
    }

    // Priority 3/4: user then system config file
    default_config_paths()
        .into_iter()
        .find(|p| p.exists())
        .ok_or_else(|| {
            Error::Config(format!(
                "No config file found. Pass --config, set {}, or create ~/.config/storsync/{}",
                CONFIG_ENV_VAR, CONFIG_FILE_NAME
            ))
        })
}

/// Default config file locations, highest priority first
pub fn default_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("storsync").join(CONFIG_FILE_NAME));
    }
    if cfg!(unix) {
        paths.push(PathBuf::from("/etc/storsync").join(CONFIG_FILE_NAME));
    }
    paths
}
