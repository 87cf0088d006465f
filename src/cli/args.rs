//! CLI argument definitions using clap
//!
//! Commands:
//! - film-catalog serve [--config <path>] [--host <host>] [--port <port>] [--data-dir <dir>]
//! - film-catalog check-config --config <path>

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Film catalog - REST backend for films and distributors
#[derive(Parser, Debug)]
#[command(name = "film-catalog")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve(ServeArgs),

    /// Load and validate a configuration file, then print it
    CheckConfig {
        /// Path to configuration file
        #[arg(long)]
        config: PathBuf,
    },
}

/// Options for `serve`; flags override the config file
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Path to a JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Host to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to
    #[arg(long)]
    pub port: Option<u16>,

    /// Directory for persisted collections
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
