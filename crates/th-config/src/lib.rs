//! # th-config
//!
//! Layered configuration loading for Tailhouse using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`TAILHOUSE_*` prefix, `__` as separator)
//! 2. Project-level `.tailhouse/config.toml`
//! 3. User-level `~/.config/tailhouse/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `TAILHOUSE_DATABASE__URL` -> `database.url`,
//! `TAILHOUSE_GENERAL__PAGE_SIZE` -> `general.page_size`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use th_config::TailConfig;
//!
//! let config = TailConfig::load_with_dotenv().expect("config");
//! if config.database.is_configured() {
//!     println!("Remote: {}", config.database.url);
//! }
//! ```

mod database;
mod display;
mod error;
mod general;

pub use database::DatabaseConfig;
pub use display::DisplayConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Project directory holding the database file and project config.
pub const PROJECT_DIR: &str = ".tailhouse";

/// Environment variable prefix for overrides.
pub const ENV_PREFIX: &str = "TAILHOUSE_";

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct TailConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

impl TailConfig {
    /// Load configuration with the project config taken from the current directory.
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source fails to parse or the result is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::extract(Self::figment())
    }

    /// Load configuration for the project rooted at `project_root`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source fails to parse or the result is invalid.
    pub fn load_for(project_root: &Path) -> Result<Self, ConfigError> {
        Self::extract(Self::figment_for(Some(project_root)))
    }

    /// Load `.env` from the current directory (if any), then [`Self::load`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source fails to parse or the result is invalid.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain rooted at the current directory.
    pub fn figment() -> Figment {
        Self::figment_for(None)
    }

    /// Build the figment provider chain.
    ///
    /// With `project_root = None` the project config is looked up relative to
    /// the current directory.
    pub fn figment_for(project_root: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = Self::project_config_path(project_root.unwrap_or_else(|| Path::new("")));
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Path of the project config file under `project_root`.
    #[must_use]
    pub fn project_config_path(project_root: &Path) -> PathBuf {
        project_root.join(PROJECT_DIR).join("config.toml")
    }

    /// Path to the user-global config file.
    #[must_use]
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("tailhouse").join("config.toml"))
    }

    fn extract(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.general.validate()?;
        Ok(config)
    }
}
