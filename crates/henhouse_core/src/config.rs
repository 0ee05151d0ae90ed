//! Runtime configuration resolved from the environment.
//!
//! # Responsibility
//! - Resolve store location, store timeout and logging setup.
//!
//! # Invariants
//! - Every setting has a default; only malformed values are errors.
//! - Business settings (egg price) live in the store, not here.

use crate::logging::{default_log_level, normalize_log_dir, LogTarget};
use std::path::PathBuf;
use std::time::Duration;

pub const ENV_DB_PATH: &str = "HENHOUSE_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "HENHOUSE_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "HENHOUSE_LOG_DIR";
pub const ENV_STORE_TIMEOUT_MS: &str = "HENHOUSE_STORE_TIMEOUT_MS";

const DEFAULT_DB_FILE_NAME: &str = "henhouse.sqlite3";
const DEFAULT_STORE_TIMEOUT_MS: u64 = 5_000;

/// Resolved runtime settings for one process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    /// File logging directory; `None` logs to stderr.
    pub log_dir: Option<PathBuf>,
    /// How long a store call may wait on a locked database.
    pub store_timeout: Duration,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level().to_string(),
            log_dir: None,
            store_timeout: Duration::from_millis(DEFAULT_STORE_TIMEOUT_MS),
        }
    }
}

impl CoreConfig {
    /// Reads `HENHOUSE_*` variables from the process environment.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves settings through an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();
        if let Some(path) = read(ENV_DB_PATH) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(level) = read(ENV_LOG_LEVEL) {
            config.log_level = level;
        }
        if let Some(dir) = read(ENV_LOG_DIR) {
            config.log_dir = Some(normalize_log_dir(&PathBuf::from(dir))?);
        }
        if let Some(timeout) = read(ENV_STORE_TIMEOUT_MS) {
            let millis = timeout.parse::<u64>().map_err(|_| {
                format!("{ENV_STORE_TIMEOUT_MS} must be a whole number of milliseconds, got `{timeout}`")
            })?;
            config.store_timeout = Duration::from_millis(millis);
        }

        Ok(config)
    }

    pub fn log_target(&self) -> LogTarget {
        match &self.log_dir {
            Some(dir) => LogTarget::Directory(dir.clone()),
            None => LogTarget::Stderr,
        }
    }
}
