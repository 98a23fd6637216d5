//! Configuration loading and resolution
//!
//! Settings resolve in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing TOML file is not an error; a malformed one is.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Default backend base URL
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default log level when neither TOML nor RUST_LOG sets one
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the backend base URL
pub const ENV_API_URL: &str = "FACEFLOW_API_URL";

/// Environment variable overriding the request timeout (seconds)
pub const ENV_TIMEOUT_SECS: &str = "FACEFLOW_TIMEOUT_SECS";

/// TOML configuration file contents
///
/// Every key is optional; absent keys fall through to compiled defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub api_url: Option<String>,

    #[serde(default)]
    pub timeout_secs: Option<u64>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// `[logging]` table of the TOML file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
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

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

/// Values supplied on the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub api_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Fully resolved client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend base URL without a trailing slash
    pub api_url: String,
    pub timeout: Duration,
    pub log_level: String,
}

impl ClientConfig {
    /// Resolve configuration from CLI overrides, environment, and TOML file
    ///
    /// `config_path` selects an explicit TOML file; when `None` the platform
    /// default location is tried.
    pub fn load(overrides: &ConfigOverrides, config_path: Option<&Path>) -> Result<Self> {
        let toml_config = match config_path {
            Some(path) => load_toml_config(path)?,
            None => match default_config_path() {
                Some(path) => load_toml_config(&path)?,
                None => None,
            },
        };

        resolve(overrides, toml_config.unwrap_or_default())
    }
}

/// Platform config file location: `<config_dir>/faceflow/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("faceflow").join("config.toml"))
}

/// Read and parse a TOML config file
///
/// Returns `Ok(None)` when the file does not exist.
pub fn load_toml_config(path: &Path) -> Result<Option<TomlConfig>> {
    if !path.exists() {
        debug!("Config file not found: {} (using defaults)", path.display());
        return Ok(None);
    }

    let content = std::fs::read_to_string(path)?;
    let config = toml::from_str::<TomlConfig>(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))?;

    info!("Loaded config file: {}", path.display());
    Ok(Some(config))
}

/// Apply the priority order to produce a validated `ClientConfig`
pub fn resolve(overrides: &ConfigOverrides, toml_config: TomlConfig) -> Result<ClientConfig> {
    let api_url = overrides
        .api_url
        .clone()
        .or_else(|| std::env::var(ENV_API_URL).ok())
        .or(toml_config.api_url)
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());

    let timeout_secs = match overrides.timeout_secs {
        Some(secs) => secs,
        None => match std::env::var(ENV_TIMEOUT_SECS) {
            Ok(raw) => raw.trim().parse::<u64>().map_err(|_| {
                Error::Config(format!("{} must be a whole number of seconds, got {:?}", ENV_TIMEOUT_SECS, raw))
            })?,
            Err(_) => toml_config.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
        },
    };

    let config = ClientConfig {
        api_url: validate_api_url(&api_url)?,
        timeout: validate_timeout(timeout_secs)?,
        log_level: toml_config.logging.level,
    };

    debug!(
        api_url = %config.api_url,
        timeout_secs = config.timeout.as_secs(),
        "Resolved client configuration"
    );
    Ok(config)
}

/// Parse a backend base URL, requiring the http(s) scheme and a host
///
/// Shared by configuration resolution and the HTTP client so both accept
/// exactly the same URLs.
pub fn parse_api_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim())
        .map_err(|e| Error::Config(format!("Invalid API URL {:?}: {}", raw, e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::Config(format!(
            "API URL must use http:// or https://, got {:?}",
            raw
        )));
    }
    if url.cannot_be_a_base() || url.host_str().map_or(true, str::is_empty) {
        return Err(Error::Config(format!("API URL has no host: {:?}", raw)));
    }

    Ok(url)
}

/// Validate with `parse_api_url`; keep the input text minus trailing slashes
fn validate_api_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    parse_api_url(trimmed)?;
    Ok(trimmed.to_string())
}

fn validate_timeout(secs: u64) -> Result<Duration> {
    if secs == 0 {
        return Err(Error::Config("Request timeout must be at least 1 second".to_string()));
    }
    Ok(Duration::from_secs(secs))
}
