//! In-memory dataset model
//!
//! A [`Dataset`] is either a table of records (the usual case) or an
//! arbitrary JSON document that is carried through the pipeline untouched.

use serde::Serialize;
use serde_json::{Map, Value};

/// One row: column name to value, in insertion order
pub type Record = Map<String, Value>;

/// Data flowing through a single pipeline run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Dataset {
    /// Ordered sequence of records
    Table(Vec<Record>),
    /// Any other JSON value (top-level object, scalar, mixed array)
    Document(Value),
}

impl Dataset {
    /// Classify a decoded JSON value
    ///
    /// Arrays whose elements are all objects (including the empty array)
    /// become tables; everything else stays a document.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Array(items) if items.iter().all(Value::is_object) => Dataset::Table(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::Object(map) => Some(map),
                        _ => None,
                    })
                    .collect(),
            ),
            other => Dataset::Document(other),
        }
    }

    /// Number of records, or the top-level length of a document
    pub fn len(&self) -> usize {
        match self {
            Dataset::Table(records) => records.len(),
            Dataset::Document(Value::Array(items)) => items.len(),
            Dataset::Document(Value::Object(map)) => map.len(),
            Dataset::Document(Value::Null) => 0,
            Dataset::Document(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Records of a table dataset
    pub fn records(&self) -> Option<&[Record]> {
        match self {
            Dataset::Table(records) => Some(records),
            Dataset::Document(_) => None,
        }
    }

    /// Column names, taken from the first record only
    pub fn columns(&self) -> Vec<String> {
        self.records()
            .and_then(|records| records.first())
            .map(|first| first.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Convert back into a JSON value
    pub fn into_value(self) -> Value {
        match self {
            Dataset::Table(records) => {
                Value::Array(records.into_iter().map(Value::Object).collect())
            }
            Dataset::Document(value) => value,
        }
    }
}

/// Name of a value's runtime type, as reported by summaries
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_array_of_objects_is_table() {
        let dataset = Dataset::from_value(json!([{"a": "1", "b": "2"}, {"a": "3", "b": "4"}]));
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.columns(), vec!["a", "b"]);
        assert!(dataset.records().is_some());
    }

    #[test]
    fn test_empty_array_is_empty_table() {
        let dataset = Dataset::from_value(json!([]));
        assert_eq!(dataset, Dataset::Table(vec![]));
        assert!(dataset.is_empty());
        assert!(dataset.columns().is_empty());
    }

    #[test]
    fn test_object_is_document() {
        let dataset = Dataset::from_value(json!({"count": 2, "items": []}));
        assert!(matches!(dataset, Dataset::Document(_)));
        assert_eq!(dataset.len(), 2);
        assert!(dataset.columns().is_empty());
    }

    #[test]
    fn test_mixed_array_is_document() {
        let dataset = Dataset::from_value(json!([{"a": 1}, 2]));
        assert!(matches!(dataset, Dataset::Document(_)));
        assert_eq!(dataset.len(), 2);
    }

    #[test]
    fn test_column_order_preserved() {
        let dataset = Dataset::from_value(json!([{"z": 1, "a": 2, "m": 3}]));
        assert_eq!(dataset.columns(), vec!["z", "a", "m"]);
    }

    #[test]
    fn test_into_value_round_trip() {
        let value = json!([{"a": "1"}]);
        assert_eq!(Dataset::from_value(value.clone()).into_value(), value);
    }

    #[test]
    fn test_type_names() {
        assert_eq!(type_name(&json!(null)), "null");
        assert_eq!(type_name(&json!(true)), "bool");
        assert_eq!(type_name(&json!(3)), "integer");
        assert_eq!(type_name(&json!(3.5)), "float");
        assert_eq!(type_name(&json!("x")), "string");
        assert_eq!(type_name(&json!([1])), "array");
        assert_eq!(type_name(&json!({})), "object");
    }
}
