//! Tracing subscriber setup
//!
//! One log line per event, either human-readable or JSON. The filter comes
//! from `RUST_LOG` when set, otherwise from the configured level.

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use super::{ObservabilityError, ObservabilityResult};

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Pretty,
    /// One JSON object per line
    Json,
}

/// Builds the filter: `RUST_LOG` wins over `default_level`
pub fn env_filter(default_level: &str) -> ObservabilityResult<EnvFilter> {
    match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(directives) if !directives.trim().is_empty() => EnvFilter::try_new(directives),
        _ => EnvFilter::try_new(default_level),
    }
    .map_err(|e| ObservabilityError::InvalidFilter(e.to_string()))
}

/// Installs the global subscriber.
///
/// # Errors
///
/// Fails on an unparseable filter or if a subscriber is already installed.
pub fn init_tracing(default_level: &str, format: LogFormat) -> ObservabilityResult<()> {
    let filter = env_filter(default_level)?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    }
    .map_err(|e| ObservabilityError::AlreadyInitialized(e.to_string()))
}
