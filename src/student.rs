//! Student record model
//!
//! All four fields are free-form strings. Empty fields are omitted when
//! a record is encoded, and absent fields decode as empty strings, so
//! partial records pass through both directions unchanged.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One student record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub age: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sex: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub city: String,
}

impl Student {
    /// Encode the record as a storable JSON document.
    pub fn to_document(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }

    /// Decode a stored JSON document into a record.
    ///
    /// Fields the record does not define (such as the store's id field)
    /// are ignored.
    pub fn from_document(document: Value) -> serde_json::Result<Self> {
        serde_json::from_value(document)
    }
}
