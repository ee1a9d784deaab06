//! Document filters
//!
//! A filter is a conjunction of field equality clauses. An empty filter
//! matches every document.

use serde_json::Value;

/// Equality filter over top-level document fields.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    clauses: Vec<(String, Value)>,
}

impl Filter {
    /// Filter that matches every document
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `field` to equal `value`.
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.clauses.push((field.into(), value.into()));
        self
    }

    /// Whether the filter has no clauses
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Whether `document` satisfies every clause.
    ///
    /// A document missing a filtered field does not match.
    pub fn matches(&self, document: &Value) -> bool {
        self.clauses
            .iter()
            .all(|(field, expected)| document.get(field) == Some(expected))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_filter_matches_all() {
        let filter = Filter::new();

        assert!(filter.is_empty());
        assert!(filter.matches(&json!({"name": "Alice"})));
        assert!(filter.matches(&json!({})));
    }

    #[test]
    fn test_eq_matches_exact_value() {
        let filter = Filter::new().eq("name", "Alice");

        assert!(filter.matches(&json!({"name": "Alice", "age": "12"})));
        assert!(!filter.matches(&json!({"name": "Bob"})));
    }

    #[test]
    fn test_missing_field_does_not_match() {
        let filter = Filter::new().eq("name", "Alice");

        assert!(!filter.matches(&json!({"age": "12"})));
    }

    #[test]
    fn test_equality_is_type_strict() {
        let filter = Filter::new().eq("age", "12");

        assert!(filter.matches(&json!({"age": "12"})));
        assert!(!filter.matches(&json!({"age": 12})));
    }

    #[test]
    fn test_all_clauses_must_match() {
        let filter = Filter::new().eq("name", "Alice").eq("city", "Pune");

        assert!(filter.matches(&json!({"name": "Alice", "city": "Pune"})));
        assert!(!filter.matches(&json!({"name": "Alice", "city": "Delhi"})));
    }
}
