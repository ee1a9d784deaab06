//! Document store error types
//!
//! Every store failure carries one of four codes. Corruption is the
//! only fatal one: a log that fails verification must stop the process
//! rather than serve from a partially replayed state.

use std::fmt;
use std::io;

/// How the process must react to a store error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The failing operation is reported; the process keeps serving
    Error,
    /// The store can no longer be trusted; the process must stop
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Failure classes of the record log and its in-memory state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorCode {
    /// Filesystem operation outside the record path (open, mkdir, stat)
    IoError,
    /// Appending or encoding a record failed
    WriteFailed,
    /// Reading the log file failed
    ReadFailed,
    /// The log contains a record that fails length or checksum checks
    DataCorruption,
}

impl StoreErrorCode {
    pub fn code(&self) -> &'static str {
        match self {
            StoreErrorCode::IoError => "ROSTERD_STORE_IO_ERROR",
            StoreErrorCode::WriteFailed => "ROSTERD_STORE_WRITE_FAILED",
            StoreErrorCode::ReadFailed => "ROSTERD_STORE_READ_FAILED",
            StoreErrorCode::DataCorruption => "ROSTERD_DATA_CORRUPTION",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            StoreErrorCode::DataCorruption => Severity::Fatal,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for StoreErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A store failure: code, message, optional context, optional I/O cause.
#[derive(Debug)]
pub struct StoreError {
    code: StoreErrorCode,
    message: String,
    details: Option<String>,
    source: Option<io::Error>,
}

impl StoreError {
    fn tagged(code: StoreErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
            source: None,
        }
    }

    fn with_source(mut self, source: io::Error) -> Self {
        self.source = Some(source);
        self
    }

    fn with_details(mut self, details: String) -> Self {
        self.details = Some(details);
        self
    }

    pub fn io_error(message: impl Into<String>, source: io::Error) -> Self {
        Self::tagged(StoreErrorCode::IoError, message).with_source(source)
    }

    pub fn write_failed(message: impl Into<String>, source: io::Error) -> Self {
        Self::tagged(StoreErrorCode::WriteFailed, message).with_source(source)
    }

    /// Write failure with no underlying I/O cause, e.g. an unencodable document.
    pub fn write_failed_no_source(message: impl Into<String>) -> Self {
        Self::tagged(StoreErrorCode::WriteFailed, message)
    }

    pub fn read_failed(message: impl Into<String>, source: io::Error) -> Self {
        Self::tagged(StoreErrorCode::ReadFailed, message).with_source(source)
    }

    pub fn data_corruption(message: impl Into<String>) -> Self {
        Self::tagged(StoreErrorCode::DataCorruption, message)
    }

    /// Corruption pinned to the byte offset where decoding stopped.
    pub fn corruption_at_offset(offset: u64, reason: impl Into<String>) -> Self {
        Self::tagged(StoreErrorCode::DataCorruption, reason)
            .with_details(format!("byte_offset: {}", offset))
    }

    /// Corruption pinned to the document whose body would not parse.
    pub fn corruption_for_document(document_id: &str, reason: impl Into<String>) -> Self {
        Self::tagged(StoreErrorCode::DataCorruption, reason)
            .with_details(format!("document_id: {}", document_id))
    }

    pub fn code(&self) -> StoreErrorCode {
        self.code
    }

    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }

    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity(), self.code, self.message)?;
        if let Some(details) = &self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.source {
            Some(e) => Some(e),
            None => None,
        }
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
