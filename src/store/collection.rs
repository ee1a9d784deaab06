//! Collection operations
//!
//! Collections expose the document operations the REST layer is built
//! on: find, insert_one, update_one, delete_one. Writes append to the
//! record log before touching in-memory state, under the writer lock,
//! so the log replays to exactly the state readers observed.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::store::database::{DatabaseInner, StoredDocument};
use crate::store::errors::{StoreError, StoreResult};
use crate::store::filter::Filter;
use crate::store::record::LogRecord;
use crate::store::update::Update;

/// Reserved field holding the document primary key.
pub const ID_FIELD: &str = "_id";

/// Result of a single-document insert.
#[derive(Debug, Clone, Serialize)]
pub struct InsertOneResult {
    /// Primary key assigned to the inserted document
    pub inserted_id: String,
}

/// Result of a single-document update.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateOneResult {
    /// Documents the filter matched (0 or 1)
    pub matched_count: u64,
    /// Documents actually changed (0 or 1)
    pub modified_count: u64,
}

/// Result of a single-document delete.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteOneResult {
    /// Documents removed (0 or 1)
    pub deleted_count: u64,
}

/// Iterator over documents matched by a find.
pub struct Cursor {
    documents: std::vec::IntoIter<Value>,
}

impl Iterator for Cursor {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        self.documents.next()
    }
}

/// Handle to one collection of a database. Cheap to clone.
#[derive(Clone)]
pub struct Collection {
    inner: Arc<DatabaseInner>,
    name: String,
}

impl Collection {
    pub(super) fn new(inner: Arc<DatabaseInner>, name: &str) -> Self {
        Self {
            inner,
            name: name.to_string(),
        }
    }

    /// Collection name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Find every document matching `filter`, in insertion order.
    pub fn find(&self, filter: Filter) -> StoreResult<Cursor> {
        let collections = self.inner.collections.read().unwrap();

        let documents: Vec<Value> = collections
            .get(&self.name)
            .map(|documents| {
                documents
                    .iter()
                    .filter(|d| filter.matches(&d.body))
                    .map(|d| d.body.clone())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Cursor {
            documents: documents.into_iter(),
        })
    }

    /// Insert one document, assigning an id unless the document already
    /// carries one under `_id`.
    pub fn insert_one(&self, mut document: Value) -> StoreResult<InsertOneResult> {
        let object = document.as_object_mut().ok_or_else(|| {
            StoreError::write_failed_no_source("Cannot insert a non-object document")
        })?;

        let inserted_id = match object.get(ID_FIELD).and_then(Value::as_str) {
            Some(id) => id.to_string(),
            None => {
                let id = Uuid::new_v4().to_string();
                object.insert(ID_FIELD.to_string(), Value::String(id.clone()));
                id
            }
        };

        let body = serde_json::to_vec(&document).map_err(|e| {
            StoreError::write_failed_no_source(format!("Failed to encode document: {}", e))
        })?;

        let mut writer = self.inner.writer.lock().unwrap();
        writer.append(&LogRecord::document(&self.name, &inserted_id, body))?;

        let mut collections = self.inner.collections.write().unwrap();
        collections
            .entry(self.name.clone())
            .or_default()
            .push(StoredDocument {
                id: inserted_id.clone(),
                body: document,
            });

        Ok(InsertOneResult { inserted_id })
    }

    /// Apply `update` to the first document matching `filter`.
    ///
    /// A match that the update leaves unchanged counts as matched but
    /// not modified, and writes nothing to the log.
    pub fn update_one(&self, filter: Filter, update: Update) -> StoreResult<UpdateOneResult> {
        let mut writer = self.inner.writer.lock().unwrap();
        let mut collections = self.inner.collections.write().unwrap();

        let documents = match collections.get_mut(&self.name) {
            Some(documents) => documents,
            None => {
                return Ok(UpdateOneResult {
                    matched_count: 0,
                    modified_count: 0,
                })
            }
        };

        let matched = match documents.iter_mut().find(|d| filter.matches(&d.body)) {
            Some(matched) => matched,
            None => {
                return Ok(UpdateOneResult {
                    matched_count: 0,
                    modified_count: 0,
                })
            }
        };

        let mut updated = matched.body.clone();
        update.apply(&mut updated);

        if updated == matched.body {
            return Ok(UpdateOneResult {
                matched_count: 1,
                modified_count: 0,
            });
        }

        let body = serde_json::to_vec(&updated).map_err(|e| {
            StoreError::write_failed_no_source(format!("Failed to encode document: {}", e))
        })?;
        writer.append(&LogRecord::document(&self.name, &matched.id, body))?;

        matched.body = updated;

        Ok(UpdateOneResult {
            matched_count: 1,
            modified_count: 1,
        })
    }

    /// Delete the first document matching `filter`.
    pub fn delete_one(&self, filter: Filter) -> StoreResult<DeleteOneResult> {
        let mut writer = self.inner.writer.lock().unwrap();
        let mut collections = self.inner.collections.write().unwrap();

        let documents = match collections.get_mut(&self.name) {
            Some(documents) => documents,
            None => return Ok(DeleteOneResult { deleted_count: 0 }),
        };

        let position = match documents.iter().position(|d| filter.matches(&d.body)) {
            Some(position) => position,
            None => return Ok(DeleteOneResult { deleted_count: 0 }),
        };

        writer.append(&LogRecord::tombstone(&self.name, &documents[position].id))?;
        documents.remove(position);

        Ok(DeleteOneResult { deleted_count: 1 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Database;
    use serde_json::json;
    use tempfile::TempDir;

    fn open_students(dir: &TempDir) -> Collection {
        Database::open(dir.path(), "student-records")
            .unwrap()
            .collection("students")
    }

    #[test]
    fn test_insert_assigns_uuid_id() {
        let dir = TempDir::new().unwrap();
        let students = open_students(&dir);

        let result = students.insert_one(json!({"name": "Alice"})).unwrap();
        assert!(Uuid::parse_str(&result.inserted_id).is_ok());

        let documents: Vec<_> = students.find(Filter::new()).unwrap().collect();
        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0][ID_FIELD], result.inserted_id.as_str());
    }

    #[test]
    fn test_insert_keeps_provided_id() {
        let dir = TempDir::new().unwrap();
        let students = open_students(&dir);

        let result = students
            .insert_one(json!({"_id": "fixed", "name": "Alice"}))
            .unwrap();
        assert_eq!(result.inserted_id, "fixed");
    }

    #[test]
    fn test_insert_rejects_non_object() {
        let dir = TempDir::new().unwrap();
        let students = open_students(&dir);

        let err = students.insert_one(json!(["not", "an", "object"])).unwrap_err();
        assert_eq!(err.code_str(), "ROSTERD_STORE_WRITE_FAILED");
    }

    #[test]
    fn test_find_preserves_insertion_order() {
        let dir = TempDir::new().unwrap();
        let students = open_students(&dir);

        for name in ["Alice", "Bob", "Cara"] {
            students.insert_one(json!({"name": name})).unwrap();
        }

        let names: Vec<String> = students
            .find(Filter::new())
            .unwrap()
            .map(|d| d["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["Alice", "Bob", "Cara"]);
    }

    #[test]
    fn test_find_applies_filter() {
        let dir = TempDir::new().unwrap();
        let students = open_students(&dir);

        students.insert_one(json!({"name": "Alice", "city": "Pune"})).unwrap();
        students.insert_one(json!({"name": "Bob", "city": "Delhi"})).unwrap();

        let matches: Vec<_> = students
            .find(Filter::new().eq("city", "Pune"))
            .unwrap()
            .collect();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0]["name"], "Alice");
    }

    #[test]
    fn test_update_one_touches_first_match_only() {
        let dir = TempDir::new().unwrap();
        let students = open_students(&dir);

        students.insert_one(json!({"name": "Alice", "age": "12"})).unwrap();
        students.insert_one(json!({"name": "Alice", "age": "15"})).unwrap();

        let result = students
            .update_one(
                Filter::new().eq("name", "Alice"),
                Update::new().set("age", "13"),
            )
            .unwrap();
        assert_eq!(result.matched_count, 1);
        assert_eq!(result.modified_count, 1);

        let ages: Vec<String> = students
            .find(Filter::new())
            .unwrap()
            .map(|d| d["age"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(ages, vec!["13", "15"]);
    }

    #[test]
    fn test_update_one_no_match_is_zero_counts() {
        let dir = TempDir::new().unwrap();
        let students = open_students(&dir);

        let result = students
            .update_one(
                Filter::new().eq("name", "Nobody"),
                Update::new().set("age", "13"),
            )
            .unwrap();
        assert_eq!(result.matched_count, 0);
        assert_eq!(result.modified_count, 0);
    }

    #[test]
    fn test_update_to_identical_value_is_not_modified() {
        let dir = TempDir::new().unwrap();
        let students = open_students(&dir);

        students.insert_one(json!({"name": "Alice", "age": "12"})).unwrap();

        let result = students
            .update_one(
                Filter::new().eq("name", "Alice"),
                Update::new().set("age", "12"),
            )
            .unwrap();
        assert_eq!(result.matched_count, 1);
        assert_eq!(result.modified_count, 0);
    }

    #[test]
    fn test_delete_one_removes_first_match_only() {
        let dir = TempDir::new().unwrap();
        let students = open_students(&dir);

        students.insert_one(json!({"name": "Alice", "age": "12"})).unwrap();
        students.insert_one(json!({"name": "Alice", "age": "15"})).unwrap();

        let result = students
            .delete_one(Filter::new().eq("name", "Alice"))
            .unwrap();
        assert_eq!(result.deleted_count, 1);

        let remaining: Vec<_> = students.find(Filter::new()).unwrap().collect();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0]["age"], "15");
    }

    #[test]
    fn test_delete_one_no_match_is_zero_count() {
        let dir = TempDir::new().unwrap();
        let students = open_students(&dir);

        let result = students
            .delete_one(Filter::new().eq("name", "Nobody"))
            .unwrap();
        assert_eq!(result.deleted_count, 0);
    }

    #[test]
    fn test_result_types_serialize_shapes() {
        let insert = serde_json::to_value(InsertOneResult {
            inserted_id: "abc".to_string(),
        })
        .unwrap();
        assert_eq!(insert, json!({"inserted_id": "abc"}));

        let update = serde_json::to_value(UpdateOneResult {
            matched_count: 1,
            modified_count: 0,
        })
        .unwrap();
        assert_eq!(update, json!({"matched_count": 1, "modified_count": 0}));

        let delete = serde_json::to_value(DeleteOneResult { deleted_count: 1 }).unwrap();
        assert_eq!(delete, json!({"deleted_count": 1}));
    }
}
