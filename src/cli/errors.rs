//! Errors reported by the rosterd command line.
//!
//! Every variant is terminal: main prints the error and exits nonzero.

use std::fmt;

/// Stable code identifying the failure class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Config file missing, unreadable, or invalid
    ConfigError,
    /// `init` ran against an initialized data directory
    AlreadyInitialized,
    /// `serve` ran against an uninitialized data directory
    NotInitialized,
    /// Startup aborted before the server could accept connections
    BootFailed,
}

impl CliErrorCode {
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "ROSTERD_CLI_CONFIG_ERROR",
            Self::AlreadyInitialized => "ROSTERD_CLI_ALREADY_INITIALIZED",
            Self::NotInitialized => "ROSTERD_CLI_NOT_INITIALIZED",
            Self::BootFailed => "ROSTERD_CLI_BOOT_FAILED",
        }
    }
}

/// A command-line failure with its code and operator-facing message.
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self {
            code: CliErrorCode::ConfigError,
            message: msg.into(),
        }
    }

    pub fn already_initialized() -> Self {
        Self {
            code: CliErrorCode::AlreadyInitialized,
            message: "Data directory already initialized".to_string(),
        }
    }

    pub fn not_initialized() -> Self {
        Self {
            code: CliErrorCode::NotInitialized,
            message: "Data directory not initialized. Run 'rosterd init' first.".to_string(),
        }
    }

    pub fn boot_failed(msg: impl Into<String>) -> Self {
        Self {
            code: CliErrorCode::BootFailed,
            message: msg.into(),
        }
    }

    pub fn code(&self) -> CliErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

/// Result alias for command handlers.
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_prefixes_code() {
        let err = CliError::config_error("data_dir must not be empty");
        assert_eq!(
            err.to_string(),
            "ROSTERD_CLI_CONFIG_ERROR: data_dir must not be empty"
        );
    }

    #[test]
    fn test_not_initialized_names_the_fix() {
        let err = CliError::not_initialized();
        assert_eq!(err.code(), CliErrorCode::NotInitialized);
        assert!(err.message().contains("rosterd init"));
    }

    #[test]
    fn test_codes_share_the_cli_prefix() {
        let codes = [
            CliErrorCode::ConfigError,
            CliErrorCode::AlreadyInitialized,
            CliErrorCode::NotInitialized,
            CliErrorCode::BootFailed,
        ];
        for code in codes {
            assert!(code.code().starts_with("ROSTERD_CLI_"));
        }
    }
}
