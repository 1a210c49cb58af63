//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::client::DEFAULT_API_BASE;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend connection configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Used for workout listings, date ranges and exercise history
    #[serde(default = "default_long_timeout")]
    pub long_timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_timeout() -> u64 {
    60
}

fn default_long_timeout() -> u64 {
    90
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            long_timeout_secs: default_long_timeout(),
        }
    }
}

fn data_file(name: &str) -> String {
    dirs::data_local_dir()
        .map(|p| p.join("musclemetrics").join(name).to_string_lossy().to_string())
        .unwrap_or_else(|| format!("./musclemetrics_data/{}", name))
}

/// Where the login token is kept
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    #[serde(default = "default_token_file")]
    pub token_file: String,
}

fn default_token_file() -> String {
    data_file("session.json")
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_file: default_token_file(),
        }
    }
}

impl SessionConfig {
    pub fn token_path(&self) -> PathBuf {
        expand_home(&self.token_file)
    }
}

/// Offline workout cache
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    #[serde(default = "default_workouts_file")]
    pub workouts_file: String,
}

fn default_workouts_file() -> String {
    data_file("workouts.json")
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            workouts_file: default_workouts_file(),
        }
    }
}

impl CacheConfig {
    pub fn workouts_path(&self) -> PathBuf {
        expand_home(&self.workouts_file)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// `pretty` or `json`
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// Replace a leading `~` with the home directory
pub fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ if path == "~" => dirs::home_dir().unwrap_or_else(|| PathBuf::from(path)),
        _ => PathBuf::from(path),
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Default config file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("musclemetrics").join("config.toml"))
    }

    /// Load from default locations or environment
    ///
    /// The first config file found is used. A file that exists but cannot be
    /// read or parsed is an error rather than a silent fall back to defaults.
    pub fn load_default() -> Result<Self, ConfigError> {
        let config_paths = [Self::default_path(), Some(PathBuf::from("./config.toml"))];
        Self::load_first(config_paths.iter().flatten())
    }

    fn load_first<'a>(paths: impl IntoIterator<Item = &'a PathBuf>) -> Result<Self, ConfigError> {
        for path in paths {
            if path.exists() {
                let config = Self::load_with_env(path)?;
                tracing::debug!("Loaded config from {:?}", path);
                return Ok(config);
            }
        }

        tracing::debug!("Using default config with environment overrides");
        Ok(Self::from_env())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply `MUSCLEMETRICS_*` overrides read through `var`
    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        // API overrides
        if let Some(url) = var("MUSCLEMETRICS_API_URL") {
            self.api.base_url = url;
        }
        if let Some(secs) = var("MUSCLEMETRICS_API_TIMEOUT").and_then(|v| v.parse().ok()) {
            self.api.timeout_secs = secs;
        }
        if let Some(secs) = var("MUSCLEMETRICS_API_LONG_TIMEOUT").and_then(|v| v.parse().ok()) {
            self.api.long_timeout_secs = secs;
        }

        // File locations
        if let Some(path) = var("MUSCLEMETRICS_TOKEN_FILE") {
            self.session.token_file = path;
        }
        if let Some(path) = var("MUSCLEMETRICS_CACHE_FILE") {
            self.cache.workouts_file = path;
        }

        // Logging overrides
        if let Some(level) = var("MUSCLEMETRICS_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("MUSCLEMETRICS_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    format!(
        r#"# MuscleMetrics Configuration
#
# Environment variables override these settings:
# - MUSCLEMETRICS_API_URL
# - MUSCLEMETRICS_API_TIMEOUT
# - MUSCLEMETRICS_API_LONG_TIMEOUT
# - MUSCLEMETRICS_TOKEN_FILE
# - MUSCLEMETRICS_CACHE_FILE
# - MUSCLEMETRICS_LOG_LEVEL
# - MUSCLEMETRICS_LOG_FORMAT

[api]
# Backend base URL, including the /api prefix
base_url = "{}"

# Request timeout in seconds
timeout_secs = 60

# Timeout for workout listings, date ranges and exercise history
long_timeout_secs = 90

[session]
# Login token file
token_file = "~/.local/share/musclemetrics/session.json"

[cache]
# Last workout listing and workouts waiting to be synced
workouts_file = "~/.local/share/musclemetrics/workouts.json"

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty or json
format = "pretty"
"#,
        DEFAULT_API_BASE
    )
}
