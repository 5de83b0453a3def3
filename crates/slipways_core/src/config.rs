//! Process-level configuration.
//!
//! # Responsibility
//! - Resolve database and logging settings once at process start.
//! - Hand an explicit config object to store construction.
//!
//! # Invariants
//! - Request handling code never reads the environment; it receives
//!   connections opened from an `AppConfig`.
//! - A blank or absent database path selects an in-memory database.

use crate::logging::default_log_level;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;

pub const ENV_KEY: &str = "SLIPWAYS_ENV";
pub const DB_PATH_KEY: &str = "SLIPWAYS_DB_PATH";
pub const BUSY_TIMEOUT_KEY: &str = "SLIPWAYS_BUSY_TIMEOUT_MS";
pub const LOG_LEVEL_KEY: &str = "SLIPWAYS_LOG_LEVEL";
pub const LOG_DIR_KEY: &str = "SLIPWAYS_LOG_DIR";

const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Deployment stage the process runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

impl Environment {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Staging => "staging",
            Self::Production => "production",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Some(Self::Development),
            "staging" => Some(Self::Staging),
            "production" | "prod" => Some(Self::Production),
            _ => None,
        }
    }
}

/// Errors raised while resolving configuration values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is set but its value cannot be interpreted.
    InvalidValue { key: &'static str, value: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { key, value } => {
                write!(f, "invalid value `{value}` for `{key}`")
            }
        }
    }
}

impl Error for ConfigError {}

/// Resolved settings for one process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub environment: Environment,
    /// SQLite file path. `None` means in-memory.
    pub db_path: Option<PathBuf>,
    pub busy_timeout: Duration,
    pub log_level: String,
    /// Absolute directory for rolling log files. `None` leaves logging off.
    pub log_dir: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Development,
            db_path: None,
            busy_timeout: Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl AppConfig {
    /// Resolves configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves configuration through an arbitrary key lookup.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();

        if let Some(raw) = read(ENV_KEY) {
            config.environment = Environment::parse(&raw).ok_or(ConfigError::InvalidValue {
                key: ENV_KEY,
                value: raw.clone(),
            })?;
        }

        config.db_path = read(DB_PATH_KEY).map(PathBuf::from);

        if let Some(raw) = read(BUSY_TIMEOUT_KEY) {
            let millis = raw.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                key: BUSY_TIMEOUT_KEY,
                value: raw.clone(),
            })?;
            config.busy_timeout = Duration::from_millis(millis);
        }

        if let Some(level) = read(LOG_LEVEL_KEY) {
            config.log_level = level;
        }
        config.log_dir = read(LOG_DIR_KEY);

        Ok(config)
    }
}
