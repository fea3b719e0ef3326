//! # wms-config
//!
//! Layered configuration loading for the WMS client using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`WMS_*` prefix, `__` as separator)
//! 2. Project-level `.wms/config.toml`
//! 3. User-level `~/.config/wms/config.toml` (or `--config-dir`)
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `WMS_DATABASE__PATH` -> `database.path`,
//! `WMS_GENERAL__SHEET_SIZE` -> `general.sheet_size`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use wms_config::WmsConfig;
//!
//! let config = WmsConfig::load_with_dotenv().expect("config");
//! if config.database.is_remote() {
//!     println!("remote database: {}", config.database.url);
//! }
//! ```

mod database;
mod error;
mod general;

pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directory name under the platform config dir and the project root.
pub const APP_DIR: &str = "wms";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct WmsConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl WmsConfig {
    /// Load configuration from all sources and validate it.
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Like [`Self::load`], reading the user-level file from `config_dir`
    /// instead of the platform default when given.
    pub fn load_from(config_dir: Option<&Path>) -> Result<Self, ConfigError> {
        let config: Self = Self::figment_for(config_dir).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load `.env` from the current directory, then [`Self::load_from`].
    pub fn load_with_dotenv_from(config_dir: Option<&Path>) -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load_from(config_dir)
    }

    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_with_dotenv_from(None)
    }

    /// Build the figment provider chain with the platform config dir.
    pub fn figment() -> Figment {
        Self::figment_for(None)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    pub fn figment_for(config_dir: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        let global_dir = config_dir.map(Path::to_path_buf).or_else(Self::global_dir);
        if let Some(global_path) = global_dir.map(|d| d.join("config.toml")) {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".wms").join("config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("WMS_").split("__"))
    }

    /// `<config_dir>/wms`, where the global config and the session file live.
    pub fn global_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join(APP_DIR))
    }

    /// Check cross-field rules that serde defaults cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.general.validate()?;
        if !self.database.is_remote() && self.database.path.trim().is_empty() {
            return Err(ConfigError::NoDatabase);
        }
        Ok(())
    }
}
