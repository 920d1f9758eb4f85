//! Environment-driven runtime configuration.
//!
//! | Variable              | Default                                   |
//! |-----------------------|-------------------------------------------|
//! | `TASKPAD_DB_PATH`     | `<temp_dir>/taskpad.sqlite3`              |
//! | `TASKPAD_LOG_DIR`     | unset: file logging stays off             |
//! | `TASKPAD_LOG_LEVEL`   | `debug` in debug builds, `info` otherwise |
//! | `TASKPAD_STORAGE_KEY` | `todos`                                   |
//!
//! Blank values count as unset.

use crate::logging::{default_log_level, normalize_level};
use crate::store::DEFAULT_STORAGE_KEY;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "TASKPAD_DB_PATH";
pub const LOG_DIR_ENV: &str = "TASKPAD_LOG_DIR";
pub const LOG_LEVEL_ENV: &str = "TASKPAD_LOG_LEVEL";
pub const STORAGE_KEY_ENV: &str = "TASKPAD_STORAGE_KEY";

const DEFAULT_DB_FILE_NAME: &str = "taskpad.sqlite3";

/// A configuration variable held an unusable value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub variable: &'static str,
    pub message: String,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid {}: {}", self.variable, self.message)
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_dir: Option<PathBuf>,
    pub log_level: &'static str,
    pub storage_key: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves configuration through `lookup`, which maps a variable name to
    /// its raw value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let db_path = read(DB_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME));

        let log_dir = match read(LOG_DIR_ENV).map(PathBuf::from) {
            Some(dir) if !dir.is_absolute() => {
                return Err(ConfigError {
                    variable: LOG_DIR_ENV,
                    message: format!("`{}` is not an absolute path", dir.display()),
                });
            }
            other => other,
        };

        let log_level = match read(LOG_LEVEL_ENV) {
            Some(raw) => normalize_level(raw.as_str()).map_err(|message| ConfigError {
                variable: LOG_LEVEL_ENV,
                message,
            })?,
            None => default_log_level(),
        };

        let storage_key =
            read(STORAGE_KEY_ENV).unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string());

        Ok(Self {
            db_path,
            log_dir,
            log_level,
            storage_key,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, DB_PATH_ENV, LOG_DIR_ENV, LOG_LEVEL_ENV, STORAGE_KEY_ENV};
    use crate::logging::default_log_level;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.db_path, std::env::temp_dir().join("taskpad.sqlite3"));
        assert_eq!(config.log_dir, None);
        assert_eq!(config.log_level, default_log_level());
        assert_eq!(config.storage_key, "todos");
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = AppConfig::from_lookup(lookup(&[
            (DB_PATH_ENV, "/var/lib/taskpad/db.sqlite3"),
            (LOG_DIR_ENV, "/var/log/taskpad"),
            (LOG_LEVEL_ENV, "Warning"),
            (STORAGE_KEY_ENV, " work-todos "),
        ]))
        .unwrap();
        assert_eq!(config.db_path, PathBuf::from("/var/lib/taskpad/db.sqlite3"));
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/taskpad")));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.storage_key, "work-todos");
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = AppConfig::from_lookup(lookup(&[(STORAGE_KEY_ENV, "   ")])).unwrap();
        assert_eq!(config.storage_key, "todos");
    }

    #[test]
    fn invalid_values_name_the_variable() {
        let err = AppConfig::from_lookup(lookup(&[(LOG_LEVEL_ENV, "loud")])).unwrap_err();
        assert_eq!(err.variable, LOG_LEVEL_ENV);
        let err = AppConfig::from_lookup(lookup(&[(LOG_DIR_ENV, "logs")])).unwrap_err();
        assert_eq!(err.variable, LOG_DIR_ENV);
    }
}
