use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::app::primes::DEFAULT_MAX_N;

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub app: AppConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub lookup: LookupConfig,
}

/// Startup state of the application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Count the counter starts at (default: 0).
    #[serde(default)]
    pub initial_count: i64,
}

/// Where state transitions are reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionLog {
    /// No transition logging.
    Off,
    /// One `tracing` event per transition.
    #[default]
    Tracing,
    /// One JSON object per line, to `json_path` or stderr.
    Json,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub transitions: TransitionLog,
    /// File receiving JSON transition lines. Only valid with `json`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json_path: Option<PathBuf>,
}

/// Settings for the local nth-prime lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupConfig {
    /// Largest n the lookup answers (default: 10000).
    #[serde(default = "default_max_n")]
    pub max_n: u64,
}

fn default_max_n() -> u64 {
    DEFAULT_MAX_N
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            max_n: default_max_n(),
        }
    }
}
