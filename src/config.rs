//! Configuration for medical-service
//!
//! Resolution order, later wins:
//! 1. Built-in defaults (`~/.medical-service/medical_service.db`, flexible menu)
//! 2. TOML file (`--config`, else `~/.medical-service/config.toml` if present)
//! 3. Environment (`MEDICAL_SERVICE_DB`, `MEDICAL_SERVICE_VARIANT`)
//! 4. Command-line flags
//!
//! ```toml
//! [database]
//! path = "/var/lib/clinic/medical_service.db"
//!
//! [service]
//! variant = "strict"
//! ```

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::logging::log_debug;
use crate::paths;

pub const DB_ENV_VAR: &str = "MEDICAL_SERVICE_DB";
pub const VARIANT_ENV_VAR: &str = "MEDICAL_SERVICE_VARIANT";

/// Which menu the service runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Open-ended entry loops ended with 'q', full set of reports
    #[default]
    Flexible,
    /// Fixed-size entry rounds (3 patients, 5 doctors, 3 appointments)
    Strict,
}

impl FromStr for Variant {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flexible" => Ok(Variant::Flexible),
            "strict" => Ok(Variant::Strict),
            other => bail!("Unknown variant '{}' (expected 'flexible' or 'strict')", other),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub service: ServiceConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file
    #[serde(default = "paths::database_path")]
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: paths::database_path(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub variant: Variant,
}

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub database: Option<PathBuf>,
    pub variant: Option<Variant>,
}

impl Config {
    /// Load configuration from TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        Self::load_from_str(&content)
    }

    /// Load configuration from string
    pub fn load_from_str(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).context("Failed to parse medical service configuration")?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.database.path.as_os_str().is_empty() {
            bail!("Database path must not be empty");
        }
        Ok(())
    }

    /// Apply environment variables through `lookup`.
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(DB_ENV_VAR).filter(|p| !p.trim().is_empty()) {
            log_debug("config", &format!("{} = {}", DB_ENV_VAR, path));
            self.database.path = PathBuf::from(path);
        }
        if let Some(variant) = lookup(VARIANT_ENV_VAR).filter(|v| !v.trim().is_empty()) {
            self.service.variant = variant
                .parse()
                .with_context(|| format!("Invalid {}", VARIANT_ENV_VAR))?;
        }
        Ok(())
    }

    pub fn apply_overrides(&mut self, overrides: Overrides) {
        if let Some(path) = overrides.database {
            self.database.path = path;
        }
        if let Some(variant) = overrides.variant {
            self.service.variant = variant;
        }
    }

    /// Resolve the effective configuration for this process.
    pub fn resolve(config_path: Option<&Path>, overrides: Overrides) -> Result<Self> {
        let mut config = match config_path {
            Some(path) => Self::load_from_file(path)?,
            None => {
                let default_path = paths::config_path();
                if default_path.exists() {
                    Self::load_from_file(&default_path)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_env_with(|key| std::env::var(key).ok())?;
        config.apply_overrides(overrides);
        config.validate()?;

        log_debug(
            "config",
            &format!(
                "database = {}, variant = {:?}",
                config.database.path.display(),
                config.service.variant
            ),
        );
        Ok(config)
    }
}
