//! Configuration management for the Kroki CLI.
//!
//! Parses `kroki.toml` with serde. Without an explicit path, the first
//! `kroki.toml` found in `/etc`, the home directory and the current directory
//! (in that order) is used; if none exists the defaults apply.
//!
//! ```toml
//! endpoint = "https://kroki.example.com"
//! timeout = "30s"
//! ```
//!
//! Environment variables override file values via [`Overrides`]:
//!
//! - `KROKI_ENDPOINT` - service base URL
//! - `KROKI_TIMEOUT` - request timeout (`20s`, `500ms`, `1m30s`, or seconds)
//!
//! ## Environment Variable Expansion
//!
//! `endpoint` supports `${VAR}` and `${VAR:-default}` references, expanded when
//! the file is loaded.

mod duration;
mod expand;

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "kroki.toml";

/// Public Kroki instance used when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str = "https://demo.kroki.io";

/// Request timeout used when nothing else is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Environment variable overriding `endpoint`.
pub const ENDPOINT_ENV: &str = "KROKI_ENDPOINT";

/// Environment variable overriding `timeout`.
pub const TIMEOUT_ENV: &str = "KROKI_TIMEOUT";

/// Directories searched for [`CONFIG_FILENAME`], in priority order.
const SEARCH_DIRS: &[&str] = &["/etc", "~", "."];

/// Settings that override configuration file values.
///
/// Only `Some` fields override the loaded config.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    /// Override service endpoint.
    pub endpoint: Option<String>,
    /// Override request timeout (unparsed duration string).
    pub timeout: Option<String>,
}

impl Overrides {
    /// Overrides from `KROKI_ENDPOINT` and `KROKI_TIMEOUT`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Overrides from an arbitrary variable lookup. Empty values are ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty =
            |name: &str| lookup(name).filter(|value: &String| !value.trim().is_empty());
        Self {
            endpoint: non_empty(ENDPOINT_ENV),
            timeout: non_empty(TIMEOUT_ENV),
        }
    }
}

/// `timeout` as written in TOML: a duration string or integer seconds.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TimeoutValue {
    Seconds(u64),
    Text(String),
}

/// Raw configuration file contents.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    endpoint: Option<String>,
    timeout: Option<TimeoutValue>,
}

/// Resolved client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Kroki service base URL.
    pub endpoint: String,
    /// Timeout for a single render request.
    pub timeout: Duration,
    /// Path to the config file, if one was loaded.
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            timeout: DEFAULT_TIMEOUT,
            config_path: None,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Explicit config file does not exist.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field name (e.g., "endpoint").
        field: String,
        /// Error message (e.g., "${`KROKI_HOST`} not set").
        message: String,
    },
    /// Timeout is not a recognizable duration.
    #[error("Invalid duration '{0}': expected a value like 20s, 500ms or 1m30s")]
    InvalidDuration(String),
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration with optional overrides.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise searches
    /// `/etc`, `$HOME` and `.` for `kroki.toml`, falling back to defaults.
    /// Overrides are applied last and the result is validated.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        overrides: Option<&Overrides>,
    ) -> Result<Self, ConfigError> {
        let search_dirs = default_search_dirs();
        Self::load_with_search_dirs(config_path, overrides, &search_dirs)
    }

    fn load_with_search_dirs(
        config_path: Option<&Path>,
        overrides: Option<&Overrides>,
        search_dirs: &[PathBuf],
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.is_file() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = discover_config(search_dirs) {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(overrides) = overrides {
            config.apply_overrides(overrides)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let file: ConfigFile = toml::from_str(&content)?;

        let endpoint = match file.endpoint {
            Some(endpoint) => expand::expand_env(&endpoint, "endpoint")?,
            None => DEFAULT_ENDPOINT.to_owned(),
        };
        let timeout = match file.timeout {
            Some(TimeoutValue::Seconds(seconds)) => Duration::from_secs(seconds),
            Some(TimeoutValue::Text(text)) => duration::parse_duration(&text)?,
            None => DEFAULT_TIMEOUT,
        };

        Ok(Self {
            endpoint,
            timeout,
            config_path: Some(path.to_path_buf()),
        })
    }

    /// Apply overrides to the configuration.
    fn apply_overrides(&mut self, overrides: &Overrides) -> Result<(), ConfigError> {
        if let Some(endpoint) = &overrides.endpoint {
            self.endpoint.clone_from(endpoint);
        }
        if let Some(timeout) = &overrides.timeout {
            self.timeout = duration::parse_duration(timeout)?;
        }
        Ok(())
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the endpoint is empty or not an
    /// http(s) URL, or the timeout is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.endpoint, "endpoint")?;
        require_http_url(&self.endpoint, "endpoint")?;

        if self.timeout.is_zero() {
            return Err(ConfigError::Validation(
                "timeout must be greater than 0".to_owned(),
            ));
        }

        Ok(())
    }
}

/// `/etc`, the home directory and the current directory.
fn default_search_dirs() -> Vec<PathBuf> {
    SEARCH_DIRS
        .iter()
        .map(|dir| PathBuf::from(shellexpand::tilde(dir).as_ref()))
        .collect()
}

/// First existing config file in `search_dirs`.
fn discover_config(search_dirs: &[PathBuf]) -> Option<PathBuf> {
    search_dirs
        .iter()
        .map(|dir| dir.join(CONFIG_FILENAME))
        .find(|candidate| candidate.is_file())
}
