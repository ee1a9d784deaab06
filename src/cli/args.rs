//! Command-line surface, declared with clap derive.
//!
//! Two subcommands: `init` prepares a data directory, `serve` runs the
//! HTTP API. Both read the same JSON config file.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// rosterd - A minimal student-records CRUD service
#[derive(Parser, Debug)]
#[command(name = "rosterd")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Initialize a new rosterd data directory
    Init {
        /// Config file to read
        #[arg(long, default_value = "./rosterd.json")]
        config: PathBuf,
    },

    /// Serve the student REST API
    Serve {
        /// Config file to read
        #[arg(long, default_value = "./rosterd.json")]
        config: PathBuf,

        /// Override the configured HTTP port
        #[arg(long)]
        port: Option<u16>,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
