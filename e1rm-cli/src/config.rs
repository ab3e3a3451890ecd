//! Optional TOML configuration with calculator defaults.
//!
//! ```toml
//! formula = "Epley"
//! unit = "kg"
//! reps = 5
//! weight = 100
//! log_level = "debug"
//! ```
//!
//! Every key is optional. Command-line flags override whatever the file sets.

use std::path::{Path, PathBuf};

use e1rm_core::state::{DEFAULT_REPS, DEFAULT_WEIGHT};
use e1rm_core::{Formula, Lift, WeightUnit};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Errors raised while loading the config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Formula name; unknown names fall back to Brzycki.
    pub formula: Option<String>,
    pub unit: Option<WeightUnit>,
    pub reps: Option<u32>,
    pub weight: Option<f64>,
    /// EnvFilter directive applied after startup unless `--log-level` is given.
    pub log_level: Option<String>,
}

impl Config {
    pub fn from_toml_str(input: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(input)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_toml_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    /// Loads `path` when given, otherwise returns the built-in defaults.
    pub fn load_optional(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn formula(&self) -> Formula {
        self.formula
            .as_deref()
            .map(Formula::parse_or_default)
            .unwrap_or_default()
    }

    pub fn unit(&self) -> WeightUnit {
        self.unit.unwrap_or_default()
    }

    pub fn reps(&self) -> u32 {
        self.reps.unwrap_or(DEFAULT_REPS)
    }

    pub fn weight(&self) -> f64 {
        self.weight.unwrap_or(DEFAULT_WEIGHT)
    }

    // --- Flag resolution: flag, then file, then built-in default ---

    pub fn resolve_formula(
        &self,
        flag: Option<&str>,
    ) -> Formula {
        flag.map(Formula::parse_or_default)
            .unwrap_or_else(|| self.formula())
    }

    pub fn resolve_unit(
        &self,
        flag: Option<WeightUnit>,
    ) -> WeightUnit {
        flag.unwrap_or_else(|| self.unit())
    }

    /// The lift to estimate from `--reps`/`--weight` and the file defaults.
    pub fn resolve_lift(
        &self,
        reps: Option<u32>,
        weight: Option<f64>,
    ) -> Lift {
        Lift::new(
            reps.unwrap_or_else(|| self.reps()),
            weight.unwrap_or_else(|| self.weight()),
        )
    }
}
