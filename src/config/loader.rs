use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::app::primes::MAX_LOOKUP_N;
use crate::config::types::{Config, TransitionLog};

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/primetime/config.toml` on Linux, or the platform
    /// equivalent via `dirs::config_dir()`. Falls back to the current
    /// directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("primetime").join("config.toml")
    }

    /// Loads configuration from the default config file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from `path`.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - If the file exists, parses it as TOML and validates.
    /// - Returns an error if reading, parsing, or validation fails.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - `lookup.max_n` is between 1 and `MAX_LOOKUP_N`
    /// - `logging.json_path` is only set when transitions are logged as JSON
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lookup.max_n == 0 {
            return Err(ConfigError::ValidationError {
                message: "lookup.max_n must be at least 1".to_string(),
            });
        }

        if self.lookup.max_n > MAX_LOOKUP_N {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "lookup.max_n must be at most {MAX_LOOKUP_N}, found {}",
                    self.lookup.max_n
                ),
            });
        }

        if self.logging.json_path.is_some() && self.logging.transitions != TransitionLog::Json {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "logging.json_path requires logging.transitions = \"json\", found {:?}",
                    self.logging.transitions
                ),
            });
        }

        Ok(())
    }
}
