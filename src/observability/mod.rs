//! Observability subsystem
//!
//! Structured logging through `tracing`:
//! - `init_tracing` installs the process-wide subscriber
//! - `Event` names lifecycle log lines
//! - request spans come from `tower_http::trace::TraceLayer`
//!
//! # Usage
//!
//! ```ignore
//! use film_catalog::observability::{init_tracing, Event, LogFormat};
//!
//! init_tracing("info", LogFormat::Json)?;
//! tracing::info!(event = Event::ServerStart.as_str(), "listening");
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{env_filter, init_tracing, LogFormat};

use thiserror::Error;

/// Observability errors are never fatal to request handling
#[derive(Debug, Error)]
pub enum ObservabilityError {
    /// Log filter directives could not be parsed
    #[error("invalid log filter: {0}")]
    InvalidFilter(String),

    /// A global subscriber was already set
    #[error("tracing already initialized: {0}")]
    AlreadyInitialized(String),
}

/// Result type for observability operations
pub type ObservabilityResult<T> = Result<T, ObservabilityError>;
