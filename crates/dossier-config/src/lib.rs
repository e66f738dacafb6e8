//! # dossier-config
//!
//! Layered configuration loading for the dossier pipeline using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`DOSSIER_*` prefix, `__` as separator)
//! 2. Project-level `.dossier/config.toml`
//! 3. User-level `~/.config/dossier/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `DOSSIER_INGEST__MAX_INTERACTIONS` -> `ingest.max_interactions`,
//! `DOSSIER_SWEEP__MAX_ARTIFACTS` -> `sweep.max_artifacts`, etc.
//!
//! Gate thresholds, the snippet cap, and the query battery are not
//! configuration; they live in `dossier-gates` and `dossier-core`.
//!
//! # Usage
//!
//! ```no_run
//! use dossier_config::DossierConfig;
//!
//! let config = DossierConfig::load_with_dotenv().expect("config");
//! println!("max interactions: {}", config.ingest.max_interactions);
//! ```

mod error;
mod general;
mod ingest;
mod sweep;

pub use error::ConfigError;
pub use general::{GeneralConfig, OUTPUT_FORMATS};
pub use ingest::IngestConfig;
pub use sweep::{MAX_ARTIFACTS_CEILING, SweepConfig};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Project-local config file, relative to the working directory.
pub const LOCAL_CONFIG_PATH: &str = ".dossier/config.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DossierConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub sweep: SweepConfig,
    #[serde(default)]
    pub ingest: IngestConfig,
}

impl DossierConfig {
    /// Load and validate configuration from all sources.
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` loading.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration with `.env` file support.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Extract and validate from an arbitrary figment.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(LOCAL_CONFIG_PATH);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("DOSSIER_").split("__"))
    }

    /// Check cross-field and range constraints serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.general.validate()?;
        self.sweep.validate()?;
        Ok(())
    }

    /// Path to the user-global config file.
    #[must_use]
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("dossier").join("config.toml"))
    }

    /// Load `.env` from the workspace root, else the current directory.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}
