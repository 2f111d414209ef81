//! Process configuration read from the environment.
//!
//! # Invariants
//! - The MongoDB URI is required and never empty.
//! - The URI is redacted from `Debug` output; it may carry credentials.

use crate::logging::default_log_level;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::path::PathBuf;

/// Connection string for the document store.
pub const MONGO_URI_VAR: &str = "MONGOURI";
/// Optional log level (`trace|debug|info|warn|error`).
pub const LOG_LEVEL_VAR: &str = "LISTINGS_LOG_LEVEL";
/// Optional absolute directory for rolling log files; stderr when unset.
pub const LOG_DIR_VAR: &str = "LISTINGS_LOG_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    MissingVar(&'static str),
    RelativeLogDir(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingVar(name) => write!(f, "environment variable `{name}` is not set"),
            Self::RelativeLogDir(value) => write!(
                f,
                "`{LOG_DIR_VAR}` must be an absolute path, got `{value}`"
            ),
        }
    }
}

impl Error for ConfigError {}

#[derive(Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub mongo_uri: String,
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
}

impl StoreConfig {
    /// Loads configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary key lookup.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mongo_uri = read(MONGO_URI_VAR).ok_or(ConfigError::MissingVar(MONGO_URI_VAR))?;
        let log_level = read(LOG_LEVEL_VAR).unwrap_or_else(|| default_log_level().to_string());
        let log_dir = match read(LOG_DIR_VAR) {
            Some(value) => {
                let path = PathBuf::from(&value);
                if !path.is_absolute() {
                    return Err(ConfigError::RelativeLogDir(value));
                }
                Some(path)
            }
            None => None,
        };

        Ok(Self {
            mongo_uri,
            log_level,
            log_dir,
        })
    }
}

impl Debug for StoreConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("mongo_uri", &"<redacted>")
            .field("log_level", &self.log_level)
            .field("log_dir", &self.log_dir)
            .finish()
    }
}
