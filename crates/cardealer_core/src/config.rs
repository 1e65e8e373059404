//! Process configuration for core bootstrap.
//!
//! # Responsibility
//! - Resolve database and logging settings from environment variables.
//! - Open the configured database.
//!
//! # Invariants
//! - Blank values are treated as unset.
//! - `log_dir`, when set, is absolute.
//! - Paths are kept as `OsString` bytes; non-UTF-8 values are not rewritten.

use crate::db::{open_db, open_db_in_memory, DbResult};
use crate::logging::default_log_level;
use log::LevelFilter;
use rusqlite::Connection;
use std::env;
use std::error::Error;
use std::ffi::OsString;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "CARDEALER_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "CARDEALER_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "CARDEALER_LOG_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    RelativeLogDir(String),
    UnsupportedLogLevel(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RelativeLogDir(value) => write!(
                f,
                "{ENV_LOG_DIR} must be an absolute path, got `{value}`"
            ),
            Self::UnsupportedLogLevel(value) => write!(
                f,
                "{ENV_LOG_LEVEL} must be one of off|error|warn|info|debug|trace, got `{value}`"
            ),
        }
    }
}

impl Error for ConfigError {}

/// Resolved core settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// SQLite file. `None` selects an in-memory store.
    pub db_path: Option<PathBuf>,
    pub log_level: LevelFilter,
    /// Rolling log directory. `None` leaves file logging off.
    pub log_dir: Option<PathBuf>,
}

impl CoreConfig {
    /// Reads settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var_os(key))
    }

    /// Reads settings through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(trimmed)
                .filter(|value| !value.is_empty())
        };

        let log_dir = match read(ENV_LOG_DIR) {
            Some(value) => {
                let path = PathBuf::from(value);
                if !path.is_absolute() {
                    return Err(ConfigError::RelativeLogDir(path.display().to_string()));
                }
                Some(path)
            }
            None => None,
        };

        Ok(Self {
            db_path: read(ENV_DB_PATH).map(PathBuf::from),
            log_level: match read(ENV_LOG_LEVEL) {
                Some(value) => parse_level(&value)?,
                None => default_log_level(),
            },
            log_dir,
        })
    }

    /// Opens the configured database with the current schema.
    pub fn open_database(&self) -> DbResult<Connection> {
        match &self.db_path {
            Some(path) => open_db(path),
            None => open_db_in_memory(),
        }
    }
}

// Only UTF-8 values are trimmed; other byte strings pass through as-is.
fn trimmed(value: OsString) -> OsString {
    match value.into_string() {
        Ok(text) => OsString::from(text.trim()),
        Err(raw) => raw,
    }
}

fn parse_level(value: &OsString) -> Result<LevelFilter, ConfigError> {
    let unsupported = || ConfigError::UnsupportedLogLevel(value.to_string_lossy().into_owned());
    let text = value.to_str().ok_or_else(unsupported)?;
    if text.eq_ignore_ascii_case("warning") {
        return Ok(LevelFilter::Warn);
    }
    text.parse().map_err(|_| unsupported())
}
