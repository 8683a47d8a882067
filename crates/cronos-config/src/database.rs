//! Remote data store configuration.
//!
//! Cronos always works against a libSQL database. With only `path` set it is
//! a plain local file; with `url` and `auth_token` set as well, the file
//! becomes an embedded replica of the hosted database.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

const fn default_sync_interval_secs() -> u64 {
    60
}

const fn default_read_your_writes() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Local database file. Empty means `<data_dir>/cronos/cronos.db`.
    #[serde(default)]
    pub path: String,

    /// Hosted database URL (e.g. `libsql://cronos-acme.turso.io`).
    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub auth_token: String,

    /// Background sync interval for the embedded replica, in seconds.
    #[serde(default = "default_sync_interval_secs")]
    pub sync_interval_secs: u64,

    #[serde(default = "default_read_your_writes")]
    pub read_your_writes: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: String::new(),
            url: String::new(),
            auth_token: String::new(),
            sync_interval_secs: default_sync_interval_secs(),
            read_your_writes: default_read_your_writes(),
        }
    }
}

impl DatabaseConfig {
    /// True when both halves of the hosted connection are present.
    #[must_use]
    pub fn is_remote(&self) -> bool {
        !self.url.is_empty() && !self.auth_token.is_empty()
    }

    /// Resolve the local database file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotConfigured` when `path` is empty and the
    /// platform has no data directory.
    pub fn resolved_path(&self) -> Result<PathBuf, ConfigError> {
        if !self.path.is_empty() {
            return Ok(PathBuf::from(&self.path));
        }
        dirs::data_dir()
            .map(|dir| dir.join("cronos").join("cronos.db"))
            .ok_or_else(|| ConfigError::NotConfigured {
                section: "database".into(),
            })
    }

    /// Check that a half-configured hosted connection is not silently
    /// treated as local-only.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the missing field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match (self.url.is_empty(), self.auth_token.is_empty()) {
            (false, true) => Err(ConfigError::InvalidValue {
                field: "database.auth_token".into(),
                reason: "required when database.url is set".into(),
            }),
            (true, false) => Err(ConfigError::InvalidValue {
                field: "database.url".into(),
                reason: "required when database.auth_token is set".into(),
            }),
            _ if self.sync_interval_secs == 0 => Err(ConfigError::InvalidValue {
                field: "database.sync_interval_secs".into(),
                reason: "must be greater than zero".into(),
            }),
            _ => Ok(()),
        }
    }
}
