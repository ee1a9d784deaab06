//! The init and serve commands
//!
//! `init` prepares a data directory and exits. `serve` follows a strict
//! boot sequence: load config, open the database (replaying the record
//! log), then bind the REST server. Any boot failure halts startup
//! immediately. No partial startup, no serving without a replayed log.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::observability::{log_event, log_event_with_fields, Event};
use crate::rest_api::{HttpConfig, RestServer};
use crate::store::Database;

use super::args::Command;
use super::errors::{CliError, CliResult};

fn default_database() -> String {
    "student-records".to_string()
}

/// Contents of the rosterd.json config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the record log (required)
    pub data_dir: String,

    /// Database name (optional, default "student-records")
    #[serde(default = "default_database")]
    pub database: String,

    /// HTTP listener settings (optional)
    #[serde(default)]
    pub http: HttpConfig,
}

impl Config {
    /// Read and validate the config file at `path`.
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Cannot read config file: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Config is not valid JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.data_dir.is_empty() {
            return Err(CliError::config_error("data_dir must not be empty"));
        }

        // The database name becomes a file name under the data directory.
        if self.database.is_empty()
            || self.database.contains(['/', '\\'])
            || self.database.contains("..")
        {
            return Err(CliError::config_error(format!(
                "Invalid database name: '{}'",
                self.database
            )));
        }

        Ok(())
    }

    pub fn data_path(&self) -> &Path {
        Path::new(&self.data_dir)
    }
}

/// Parse argv and dispatch. The one call main makes.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Dispatch an already parsed command.
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init { config } => init(&config),
        Command::Serve { config, port } => serve(&config, port),
    }
}

/// Initialize a new rosterd data directory
///
/// Creates the directory structure only. Does not start a server and
/// writes no records.
pub fn init(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;
    let data_dir = config.data_path();

    if is_initialized(data_dir) {
        return Err(CliError::already_initialized());
    }

    let data_path = data_dir.join("data");
    fs::create_dir_all(&data_path).map_err(|e| {
        CliError::config_error(format!("Failed to create directory {:?}: {}", data_path, e))
    })?;

    println!("{}", json!({"initialized": true}));

    Ok(())
}

/// Serve the student REST API
///
/// Boot sequence:
/// 1. Configuration load
/// 2. Database open (record log replay)
/// 3. REST server bind
pub fn serve(config_path: &Path, port: Option<u16>) -> CliResult<()> {
    log_event(Event::BootStart);

    let config = Config::load(config_path)?;
    log_event_with_fields(
        Event::ConfigLoaded,
        &[
            ("data_dir", config.data_dir.as_str()),
            ("database", config.database.as_str()),
        ],
    );

    let data_dir = config.data_path();
    if !is_initialized(data_dir) {
        return Err(CliError::not_initialized());
    }

    let db = Database::open(data_dir, &config.database)
        .map_err(|e| CliError::boot_failed(format!("Failed to open database: {}", e)))?;

    let documents = db.document_count().to_string();
    log_event_with_fields(
        Event::StoreOpened,
        &[
            ("database", config.database.as_str()),
            ("documents", documents.as_str()),
        ],
    );

    let http_config = match port {
        Some(port) => config.http.with_port(port),
        None => config.http.clone(),
    };
    let server = RestServer::new(&http_config, db);

    log_event(Event::BootComplete);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })?;

    Ok(())
}

// An initialized data directory has a data/ subdirectory.
fn is_initialized(data_dir: &Path) -> bool {
    data_dir.join("data").exists()
}
