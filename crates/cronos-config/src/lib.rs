//! # cronos-config
//!
//! Layered configuration loading for Cronos using figment.
//!
//! Sources, highest priority first:
//! 1. Environment variables (`CRONOS_*` prefix, `__` as separator)
//! 2. Project-level `.cronos/config.toml`
//! 3. User-level `~/.config/cronos/config.toml`
//! 4. Built-in defaults
//!
//! `CRONOS_DATABASE__PATH` maps to `database.path`,
//! `CRONOS_AUTH__USER_ID` to `auth.user_id`, and so on.
//!
//! ```no_run
//! use cronos_config::CronosConfig;
//!
//! let config = CronosConfig::load_with_dotenv().expect("config");
//! if config.database.is_remote() {
//!     println!("syncing with {}", config.database.url);
//! }
//! ```

mod auth;
mod database;
mod error;
mod general;

pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;

use std::path::PathBuf;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

/// Environment variable prefix for every setting.
pub const ENV_PREFIX: &str = "CRONOS_";

/// Project-local config file, relative to the working directory.
pub const PROJECT_CONFIG: &str = ".cronos/config.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CronosConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl CronosConfig {
    /// Load configuration from TOML files and environment variables.
    ///
    /// Does not read `.env`; see [`CronosConfig::load_with_dotenv`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` when a source cannot be parsed, or
    /// `ConfigError::InvalidValue` when the database section is inconsistent.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.database.validate()?;
        Ok(config)
    }

    /// Load `.env` from the working directory (if any), then [`Self::load`].
    ///
    /// # Errors
    ///
    /// See [`CronosConfig::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        // A missing .env is the normal case.
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the provider chain. Public so tests can extract from it or
    /// layer extra providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(PROJECT_CONFIG);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("cronos").join("config.toml"))
    }
}
