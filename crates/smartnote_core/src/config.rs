//! Runtime configuration.
//!
//! # Responsibility
//! - Resolve the data path and logging settings for one process.
//! - Layer defaults, then environment variables; front ends apply flags last.
//!
//! # Invariants
//! - Environment variables that are set must be non-empty.
//! - The log level is normalized to `trace|debug|info|warn|error`.
//! - Resolution runs before the logger starts, so it emits no log events.

use crate::logging::{default_log_level, normalize_level};
use crate::storage::DEFAULT_DATA_PATH;
use std::env;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DATA_PATH_ENV: &str = "SMARTNOTE_DATA_PATH";
pub const LOG_LEVEL_ENV: &str = "SMARTNOTE_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "SMARTNOTE_LOG_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyValue(&'static str),
    InvalidLevel(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyValue(key) => write!(f, "{key} is set but empty"),
            Self::InvalidLevel(message) => f.write_str(message),
        }
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// State document location.
    pub data_path: PathBuf,
    pub log_level: &'static str,
    /// File logging is disabled when `None`.
    pub log_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

impl AppConfig {
    /// Defaults overridden by `SMARTNOTE_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = non_empty(&lookup, DATA_PATH_ENV)? {
            config.data_path = PathBuf::from(path);
        }
        if let Some(level) = non_empty(&lookup, LOG_LEVEL_ENV)? {
            config.log_level = normalize_level(&level).map_err(ConfigError::InvalidLevel)?;
        }
        if let Some(dir) = non_empty(&lookup, LOG_DIR_ENV)? {
            config.log_dir = Some(PathBuf::from(dir));
        }
        Ok(config)
    }

    pub fn with_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_path = path.into();
        self
    }

    pub fn with_log_level(mut self, level: &str) -> Result<Self, ConfigError> {
        self.log_level = normalize_level(level).map_err(ConfigError::InvalidLevel)?;
        Ok(self)
    }

    pub fn with_log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = Some(dir.into());
        self
    }
}

fn non_empty<F>(lookup: &F, key: &'static str) -> Result<Option<String>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(value) if value.trim().is_empty() => Err(ConfigError::EmptyValue(key)),
        Some(value) => Ok(Some(value.trim().to_string())),
    }
}
