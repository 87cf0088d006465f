//! CLI module
//!
//! Provides command-line interface for:
//! - serve: Load config, open the store, serve HTTP
//! - check-config: Validate a configuration file

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command, ServeArgs};
pub use commands::{check_config, load_config, open_store, resolve_config, run_command, serve};
pub use errors::{CliError, CliResult};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    run_command(Cli::parse_args().command)
}
