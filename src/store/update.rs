//! Document updates
//!
//! An update is a set of field assignments applied to a matched
//! document. Fields not named by the update are left untouched.

use serde_json::Value;

/// Field-level update applied to a matching document.
#[derive(Debug, Clone, Default)]
pub struct Update {
    sets: Vec<(String, Value)>,
}

impl Update {
    /// Update that changes nothing
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign `value` to `field`.
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.sets.push((field.into(), value.into()));
        self
    }

    /// Whether the update has no assignments
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Apply every assignment to `document`.
    ///
    /// Assignments to fields the document does not have yet are added.
    /// Non-object documents are left unchanged.
    pub fn apply(&self, document: &mut Value) {
        if let Some(object) = document.as_object_mut() {
            for (field, value) in &self.sets {
                object.insert(field.clone(), value.clone());
            }
        }
    }
}
