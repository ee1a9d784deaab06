//! Command-line interface for rosterd
//!
//! `init` lays out a fresh data directory; `serve` opens the store and
//! runs the student REST API until the process is stopped.

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{init, run, run_command, serve, Config};
pub use errors::{CliError, CliErrorCode, CliResult};
