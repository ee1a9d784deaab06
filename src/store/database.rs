//! Database handle and log replay
//!
//! A database is an in-memory map of collections rebuilt from the
//! record log at open. Collections keep documents in insertion order:
//! replay rewrites updated documents in place and drops tombstoned
//! ones, so the order observed by readers is stable across restarts.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, RwLock};

use serde_json::Value;

use crate::store::collection::Collection;
use crate::store::errors::{StoreError, StoreResult};
use crate::store::reader::LogReader;
use crate::store::writer::LogWriter;

/// A live document with its assigned id.
#[derive(Debug, Clone)]
pub(super) struct StoredDocument {
    pub id: String,
    pub body: Value,
}

pub(super) struct DatabaseInner {
    pub name: String,
    /// Acquired before `collections` and held across the matching state
    /// mutation, so log order always equals in-memory order.
    pub writer: Mutex<LogWriter>,
    pub collections: RwLock<HashMap<String, Vec<StoredDocument>>>,
}

/// Handle to an open database. Cheap to clone.
#[derive(Clone)]
pub struct Database {
    inner: Arc<DatabaseInner>,
}

impl Database {
    /// Open the database named `database` under `data_dir`, replaying
    /// its record log into memory.
    ///
    /// Fails if the log cannot be read or contains a corrupted record.
    pub fn open(data_dir: impl AsRef<Path>, database: &str) -> StoreResult<Self> {
        let writer = LogWriter::open(&data_dir, database)?;

        let mut reader = LogReader::open(writer.path())?;
        let mut collections: HashMap<String, Vec<StoredDocument>> = HashMap::new();

        while reader.has_more() {
            let record = reader.read_next()?;
            let documents = collections.entry(record.collection).or_default();

            if record.is_tombstone {
                if let Some(position) = documents.iter().position(|d| d.id == record.document_id) {
                    documents.remove(position);
                }
                continue;
            }

            let body: Value = serde_json::from_slice(&record.document_body).map_err(|e| {
                StoreError::corruption_for_document(&record.document_id, e.to_string())
            })?;

            match documents.iter_mut().find(|d| d.id == record.document_id) {
                Some(existing) => existing.body = body,
                None => documents.push(StoredDocument {
                    id: record.document_id,
                    body,
                }),
            }
        }

        Ok(Self {
            inner: Arc::new(DatabaseInner {
                name: database.to_string(),
                writer: Mutex::new(writer),
                collections: RwLock::new(collections),
            }),
        })
    }

    /// Database name
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Handle to the named collection. Created lazily on first write.
    pub fn collection(&self, name: &str) -> Collection {
        Collection::new(Arc::clone(&self.inner), name)
    }

    /// Total live documents across all collections
    pub fn document_count(&self) -> usize {
        self.inner
            .collections
            .read()
            .unwrap()
            .values()
            .map(Vec::len)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::record::LogRecord;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_open_fresh_database() {
        let dir = TempDir::new().unwrap();
        let db = Database::open(dir.path(), "student-records").unwrap();

        assert_eq!(db.name(), "student-records");
        assert_eq!(db.document_count(), 0);
    }

    #[test]
    fn test_replay_restores_documents() {
        let dir = TempDir::new().unwrap();

        {
            let db = Database::open(dir.path(), "student-records").unwrap();
            let students = db.collection("students");
            students.insert_one(json!({"name": "Alice"})).unwrap();
            students.insert_one(json!({"name": "Bob"})).unwrap();
        }

        let db = Database::open(dir.path(), "student-records").unwrap();
        assert_eq!(db.document_count(), 2);

        let names: Vec<String> = db
            .collection("students")
            .find(crate::store::Filter::new())
            .unwrap()
            .map(|doc| doc["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["Alice", "Bob"]);
    }

    #[test]
    fn test_replay_drops_tombstoned_documents() {
        let dir = TempDir::new().unwrap();

        {
            let db = Database::open(dir.path(), "student-records").unwrap();
            let students = db.collection("students");
            students.insert_one(json!({"name": "Alice"})).unwrap();
            students
                .delete_one(crate::store::Filter::new().eq("name", "Alice"))
                .unwrap();
        }

        let db = Database::open(dir.path(), "student-records").unwrap();
        assert_eq!(db.document_count(), 0);
    }

    #[test]
    fn test_replay_keeps_updated_document_position() {
        let dir = TempDir::new().unwrap();

        {
            let db = Database::open(dir.path(), "student-records").unwrap();
            let students = db.collection("students");
            students.insert_one(json!({"name": "Alice", "age": "12"})).unwrap();
            students.insert_one(json!({"name": "Bob", "age": "11"})).unwrap();
            students
                .update_one(
                    crate::store::Filter::new().eq("name", "Alice"),
                    crate::store::Update::new().set("age", "13"),
                )
                .unwrap();
        }

        let db = Database::open(dir.path(), "student-records").unwrap();
        let documents: Vec<_> = db
            .collection("students")
            .find(crate::store::Filter::new())
            .unwrap()
            .collect();

        assert_eq!(documents.len(), 2);
        assert_eq!(documents[0]["name"], "Alice");
        assert_eq!(documents[0]["age"], "13");
        assert_eq!(documents[1]["name"], "Bob");
    }

    #[test]
    fn test_corrupted_log_fails_open() {
        let dir = TempDir::new().unwrap();

        {
            let db = Database::open(dir.path(), "student-records").unwrap();
            db.collection("students")
                .insert_one(json!({"name": "Alice"}))
                .unwrap();
        }

        let path = dir.path().join("data").join("student-records.dat");
        let mut bytes = fs::read(&path).unwrap();
        let mid = bytes.len() / 2;
        bytes[mid] ^= 0xFF;
        fs::write(&path, &bytes).unwrap();

        let err = Database::open(dir.path(), "student-records").unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn test_unparseable_body_is_corruption() {
        let dir = TempDir::new().unwrap();

        {
            let mut writer = LogWriter::open(dir.path(), "student-records").unwrap();
            let record = LogRecord::document("students", "doc-1", b"not json".to_vec());
            writer.append(&record).unwrap();
        }

        let err = Database::open(dir.path(), "student-records").unwrap_err();
        assert!(err.is_fatal());
        assert_eq!(err.details(), Some("document_id: doc-1"));
    }
}
