//! Process configuration for the items service.
//!
//! # Responsibility
//! - Read service settings from the environment (after an optional `.env`).
//! - Reject missing or malformed required settings before anything boots.
//!
//! # Invariants
//! - `DB` is mandatory; there is no implicit default database.

use crate::logging::default_log_level;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const DB_KEY: &str = "DB";
pub const HOST_KEY: &str = "HOST";
pub const PORT_KEY: &str = "PORT";
pub const LOG_LEVEL_KEY: &str = "LOG_LEVEL";
pub const LOG_DIR_KEY: &str = "LOG_DIR";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

/// Resolved service configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// SQLite database path, or `:memory:`.
    pub db: String,
    pub host: String,
    pub port: u16,
    pub log_level: String,
    /// Absolute directory for rolling log files; `None` logs to stderr.
    pub log_dir: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing(key) => write!(f, "required setting `{key}` is not set"),
            Self::Invalid { key, value, reason } => {
                write!(f, "invalid value `{value}` for `{key}`: {reason}")
            }
        }
    }
}

impl Error for ConfigError {}

impl Config {
    /// Loads `.env` from the working directory if present, then reads the
    /// process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is normal outside local development.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let db = get(DB_KEY).ok_or(ConfigError::Missing(DB_KEY))?;
        let host = get(HOST_KEY).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match get(PORT_KEY) {
            Some(raw) => raw.parse::<u16>().map_err(|err| ConfigError::Invalid {
                key: PORT_KEY,
                value: raw.clone(),
                reason: err.to_string(),
            })?,
            None => DEFAULT_PORT,
        };
        let log_level = get(LOG_LEVEL_KEY).unwrap_or_else(|| default_log_level().to_string());
        let log_dir = get(LOG_DIR_KEY);

        Ok(Self {
            db,
            host,
            port,
            log_level,
            log_dir,
        })
    }

    /// `host:port` string suitable for a TCP listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::{Config, ConfigError, DB_KEY, PORT_KEY};
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn missing_db_is_rejected() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert_eq!(err, ConfigError::Missing(DB_KEY));

        let err = Config::from_lookup(lookup(&[("DB", "   ")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing(DB_KEY));
    }

    #[test]
    fn defaults_apply_when_optional_keys_are_absent() {
        let config = Config::from_lookup(lookup(&[("DB", "items.sqlite3")])).unwrap();
        assert_eq!(config.db, "items.sqlite3");
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert!(config.log_dir.is_none());
        assert!(!config.log_level.is_empty());
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = Config::from_lookup(lookup(&[
            ("DB", ":memory:"),
            ("HOST", "127.0.0.1"),
            ("PORT", "9000"),
            ("LOG_LEVEL", "warn"),
            ("LOG_DIR", "/var/log/items"),
        ]))
        .unwrap();
        assert_eq!(config.bind_addr(), "127.0.0.1:9000");
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir.as_deref(), Some("/var/log/items"));
    }

    #[test]
    fn unparsable_port_is_rejected() {
        let err = Config::from_lookup(lookup(&[("DB", "x"), ("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key, .. } if key == PORT_KEY));
    }
}
