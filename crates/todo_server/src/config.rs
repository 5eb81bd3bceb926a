//! Environment-driven server configuration.
//!
//! # Invariants
//! - Unset or blank variables fall back to their defaults.
//! - Invalid values are reported, never silently replaced.

use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::path::PathBuf;
use todo_core::{default_log_level, LogLevel};

pub const DB_PATH_VAR: &str = "TODO_DB_PATH";
pub const BIND_ADDR_VAR: &str = "TODO_BIND_ADDR";
pub const LOG_LEVEL_VAR: &str = "TODO_LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "TODO_LOG_DIR";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";
const DEFAULT_DB_FILE: &str = "todo_service.sqlite3";
const DEFAULT_LOG_DIR: &str = "todo_service_logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub db_path: PathBuf,
    pub bind_addr: SocketAddr,
    pub log_level: LogLevel,
    pub log_dir: PathBuf,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invalid { var, value, reason } => {
                write!(f, "invalid {var}=`{value}`: {reason}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|raw| !raw.is_empty())
        };

        let db_path = value(DB_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE));
        let log_dir = value(LOG_DIR_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_LOG_DIR));

        let bind_raw = value(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .parse::<SocketAddr>()
            .map_err(|err| ConfigError::Invalid {
                var: BIND_ADDR_VAR,
                value: bind_raw.clone(),
                reason: err.to_string(),
            })?;

        let log_level = match value(LOG_LEVEL_VAR) {
            Some(raw) => raw.parse::<LogLevel>().map_err(|reason| ConfigError::Invalid {
                var: LOG_LEVEL_VAR,
                value: raw.clone(),
                reason,
            })?,
            None => default_log_level(),
        };

        Ok(Self {
            db_path,
            bind_addr,
            log_level,
            log_dir,
        })
    }
}
