//! Append-only record log writer

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::store::errors::{StoreError, StoreResult};
use crate::store::record::LogRecord;

/// Appends records to the database log file.
///
/// Every append is followed by a sync so acknowledged writes survive a
/// crash. Records are never rewritten in place.
pub struct LogWriter {
    file: File,
    path: PathBuf,
    offset: u64,
}

impl LogWriter {
    /// Open (or create) the log file for `database` under `data_dir`.
    pub fn open(data_dir: impl AsRef<Path>, database: &str) -> StoreResult<Self> {
        let data_path = data_dir.as_ref().join("data");
        fs::create_dir_all(&data_path).map_err(|e| {
            StoreError::io_error(
                format!("Failed to create data directory: {}", data_path.display()),
                e,
            )
        })?;

        let path = data_path.join(format!("{}.dat", database));
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                StoreError::io_error(format!("Failed to open log file: {}", path.display()), e)
            })?;

        let offset = file
            .metadata()
            .map_err(|e| StoreError::io_error("Failed to read log file metadata", e))?
            .len();

        Ok(Self { file, path, offset })
    }

    /// Append a record and sync it to disk.
    ///
    /// Returns the offset at which the record was written.
    pub fn append(&mut self, record: &LogRecord) -> StoreResult<u64> {
        let serialized = record.serialize();
        let written_at = self.offset;

        self.file.write_all(&serialized).map_err(|e| {
            StoreError::write_failed(
                format!("Failed to append record for document {}", record.document_id),
                e,
            )
        })?;

        self.file
            .sync_all()
            .map_err(|e| StoreError::write_failed("Failed to sync log file", e))?;

        self.offset += serialized.len() as u64;

        Ok(written_at)
    }

    /// Path of the underlying log file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current end-of-log offset
    pub fn current_offset(&self) -> u64 {
        self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_record(id: &str) -> LogRecord {
        LogRecord::document("students", id, br#"{"name": "Alice"}"#.to_vec())
    }

    #[test]
    fn test_open_creates_data_directory() {
        let dir = TempDir::new().unwrap();
        let writer = LogWriter::open(dir.path(), "student-records").unwrap();

        assert!(dir.path().join("data").is_dir());
        assert!(writer.path().ends_with("data/student-records.dat"));
        assert_eq!(writer.current_offset(), 0);
    }

    #[test]
    fn test_append_advances_offset() {
        let dir = TempDir::new().unwrap();
        let mut writer = LogWriter::open(dir.path(), "student-records").unwrap();

        let record = sample_record("doc-1");
        let first = writer.append(&record).unwrap();
        let second = writer.append(&record).unwrap();

        assert_eq!(first, 0);
        assert_eq!(second, record.serialize().len() as u64);
        assert_eq!(writer.current_offset(), second * 2);
    }

    #[test]
    fn test_reopen_resumes_at_end() {
        let dir = TempDir::new().unwrap();
        let record = sample_record("doc-1");

        let mut writer = LogWriter::open(dir.path(), "student-records").unwrap();
        writer.append(&record).unwrap();
        let end = writer.current_offset();
        drop(writer);

        let reopened = LogWriter::open(dir.path(), "student-records").unwrap();
        assert_eq!(reopened.current_offset(), end);
    }
}
