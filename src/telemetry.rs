//! # Telemetry
//!
//! Tracing subscriber setup for binaries and embedding services.
//!
//! `RUST_LOG` takes precedence over the configured level. Library code only
//! emits events; installing a subscriber is left to the host.
//!
//! ```rust,no_run
//! use procure_compare::config::AppConfig;
//! use procure_compare::telemetry::init_tracing;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = AppConfig::load()?;
//!     init_tracing(&config.log)?;
//!     tracing::info!("ready");
//!     Ok(())
//! }
//! ```

use crate::config::LogConfig;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Error raised while installing the subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The level directive could not be parsed.
    #[error("invalid log filter '{directive}': {reason}")]
    InvalidFilter {
        /// Rejected directive.
        directive: String,
        /// Parser message.
        reason: String,
    },

    /// A global subscriber is already installed.
    #[error("failed to initialize tracing: {0}")]
    Init(String),
}

/// Builds the event filter: `RUST_LOG` if set and valid, else the
/// configured level.
///
/// # Errors
///
/// Returns `TelemetryError::InvalidFilter` if the configured level is not a
/// valid directive.
pub fn build_filter(config: &LogConfig) -> Result<EnvFilter, TelemetryError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(&config.level).map_err(|e| TelemetryError::InvalidFilter {
        directive: config.level.clone(),
        reason: e.to_string(),
    })
}

/// Installs the global fmt subscriber.
///
/// # Errors
///
/// Returns `TelemetryError` if the filter is invalid or a subscriber is
/// already installed.
pub fn init_tracing(config: &LogConfig) -> Result<(), TelemetryError> {
    let filter = build_filter(config)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let result = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|e| TelemetryError::Init(e.to_string()))
}
