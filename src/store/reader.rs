//! Record log reader
//!
//! Reads the log sequentially from the start. Any malformed or
//! checksum-failing record is reported as corruption with the byte
//! offset where decoding stopped.

use std::fs;
use std::path::Path;

use crate::store::errors::{StoreError, StoreResult};
use crate::store::record::LogRecord;

/// Sequential reader over a database log file.
pub struct LogReader {
    buffer: Vec<u8>,
    offset: usize,
}

impl LogReader {
    /// Open the log file at `path`. A missing file reads as an empty log.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();

        let buffer = if path.exists() {
            fs::read(path).map_err(|e| {
                StoreError::read_failed(format!("Failed to read log file: {}", path.display()), e)
            })?
        } else {
            Vec::new()
        };

        Ok(Self { buffer, offset: 0 })
    }

    /// Open the log file for `database` under `data_dir`.
    pub fn open_database(data_dir: impl AsRef<Path>, database: &str) -> StoreResult<Self> {
        let path = data_dir
            .as_ref()
            .join("data")
            .join(format!("{}.dat", database));
        Self::open(path)
    }

    /// Whether any unread bytes remain
    pub fn has_more(&self) -> bool {
        self.offset < self.buffer.len()
    }

    /// Byte offset of the next record
    pub fn current_offset(&self) -> u64 {
        self.offset as u64
    }

    /// Decode the next record.
    pub fn read_next(&mut self) -> StoreResult<LogRecord> {
        let at = self.offset as u64;

        let (record, consumed) = LogRecord::deserialize(&self.buffer[self.offset..])
            .map_err(|e| StoreError::corruption_at_offset(at, e.to_string()))?;

        self.offset += consumed;

        Ok(record)
    }

    /// Decode every remaining record in log order.
    pub fn read_all(&mut self) -> StoreResult<Vec<LogRecord>> {
        let mut records = Vec::new();
        while self.has_more() {
            records.push(self.read_next()?);
        }
        Ok(records)
    }
}
