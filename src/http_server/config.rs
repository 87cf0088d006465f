//! HTTP Server Configuration
//!
//! Bind address, CORS, persistence directory and logging settings. Every
//! field has a default, so an empty JSON object is a valid config file.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::observability::LogFormat;

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 3000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// CORS allowed origins; empty allows any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Directory for collection files; memory only when absent
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Default log filter, overridden by `RUST_LOG` (default: "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log output format (default: pretty)
    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            data_dir: None,
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

impl ServerConfig {
    /// Create a new config with specified port
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Checks values serde cannot reject on its own
    pub fn validate(&self) -> Result<(), String> {
        if self.host.trim().is_empty() {
            return Err("host must not be empty".into());
        }
        if self.port == 0 {
            return Err("port must be > 0".into());
        }
        if self.log_level.trim().is_empty() {
            return Err("log_level must not be empty".into());
        }
        Ok(())
    }
}
