//! CLI-specific error types
//!
//! All CLI errors are fatal: `main` prints them and exits non-zero.

use std::io;

use thiserror::Error;

use crate::observability::ObservabilityError;

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file unreadable or invalid
    #[error("config error: {0}")]
    Config(String),

    /// Runtime or listener I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Logging could not be set up
    #[error(transparent)]
    Observability(#[from] ObservabilityError),
}

impl CliError {
    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
