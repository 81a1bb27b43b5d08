//! # Configuration
//!
//! Layered runtime configuration.
//!
//! Sources, lowest priority first:
//!
//! 1. Built-in defaults
//! 2. `procure-compare.toml` in the working directory (optional)
//! 3. Environment variables prefixed `PROCURE__`, with `__` between
//!    sections, e.g. `PROCURE__LOG__LEVEL=debug` or
//!    `PROCURE__SCORING__PRICE_WEIGHT=50`
//!
//! A `.env` file is loaded into the environment first when present.

use crate::domain::errors::DomainError;
use crate::domain::value_objects::ScoringCriteria;
use crate::domain::value_objects::scoring_criteria::{
    DEFAULT_COMPLIANCE_WEIGHT, DEFAULT_DELIVERY_WEIGHT, DEFAULT_PRICE_WEIGHT,
    DEFAULT_QUALITY_WEIGHT,
};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default configuration file name, without extension.
pub const CONFIG_FILE: &str = "procure-compare";
/// Environment variable prefix.
pub const ENV_PREFIX: &str = "PROCURE";
/// Separator between prefix, sections and keys in environment variables.
pub const ENV_SEPARATOR: &str = "__";

/// Error raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or deserialized.
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// Values were read but are not acceptable.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl From<DomainError> for ConfigError {
    fn from(err: DomainError) -> Self {
        Self::Invalid(err.to_string())
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Filter directive used when `RUST_LOG` is unset, e.g. `info` or
    /// `procure_compare=debug`.
    pub level: String,
    /// Emit JSON lines instead of human-readable text.
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Weights new comparisons start with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringDefaults {
    /// Price weight.
    pub price_weight: f64,
    /// Quality weight.
    pub quality_weight: f64,
    /// Delivery weight.
    pub delivery_weight: f64,
    /// Compliance weight.
    pub compliance_weight: f64,
}

impl ScoringDefaults {
    /// Converts to validated criteria.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCriteria` if the weights are invalid.
    pub fn criteria(&self) -> Result<ScoringCriteria, DomainError> {
        ScoringCriteria::new(
            self.price_weight,
            self.quality_weight,
            self.delivery_weight,
            self.compliance_weight,
        )
    }
}

impl Default for ScoringDefaults {
    fn default() -> Self {
        Self {
            price_weight: DEFAULT_PRICE_WEIGHT,
            quality_weight: DEFAULT_QUALITY_WEIGHT,
            delivery_weight: DEFAULT_DELIVERY_WEIGHT,
            compliance_weight: DEFAULT_COMPLIANCE_WEIGHT,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Logging settings.
    pub log: LogConfig,
    /// Default scoring weights.
    pub scoring: ScoringDefaults,
}

impl AppConfig {
    /// Loads `.env`, the optional config file and `PROCURE__*` variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source is malformed or the scoring
    /// weights are invalid.
    pub fn load() -> Result<Self, ConfigError> {
        // A missing .env file is normal.
        let _ = dotenvy::dotenv();
        Self::from_sources(
            File::with_name(CONFIG_FILE).required(false),
            Environment::with_prefix(ENV_PREFIX),
        )
    }

    /// Builds configuration from a TOML document, with defaults for any
    /// missing key.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the document is malformed or the scoring
    /// weights are invalid.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        Self::from_sources(
            File::from_str(toml, FileFormat::Toml),
            Environment::with_prefix(ENV_PREFIX).source(Some(config::Map::new())),
        )
    }

    /// Returns the validated default scoring criteria.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCriteria` if the weights are invalid.
    pub fn default_criteria(&self) -> Result<ScoringCriteria, DomainError> {
        self.scoring.criteria()
    }

    fn from_sources<F>(file: F, env: Environment) -> Result<Self, ConfigError>
    where
        F: config::Source + Send + Sync + 'static,
    {
        let defaults = Self::default();
        let settings = Config::builder()
            .set_default("log.level", defaults.log.level)?
            .set_default("log.json", defaults.log.json)?
            .set_default("scoring.price_weight", defaults.scoring.price_weight)?
            .set_default("scoring.quality_weight", defaults.scoring.quality_weight)?
            .set_default("scoring.delivery_weight", defaults.scoring.delivery_weight)?
            .set_default("scoring.compliance_weight", defaults.scoring.compliance_weight)?
            .add_source(file)
            .add_source(
                env.prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()?;

        let loaded: Self = settings.try_deserialize()?;
        loaded.default_criteria()?;
        Ok(loaded)
    }
}
