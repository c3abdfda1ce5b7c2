//! Column adder transformer
//!
//! Sets constant-valued columns on every record.

use crate::dataset::Record;
use crate::error::Result;
use crate::etl::Transformer;
use serde_json::{Map, Value};

/// Transformer that sets each configured column to a constant value
///
/// Existing values are overwritten. Any JSON value is accepted.
///
/// # Example
/// ```
/// use etl_processor::transform::ColumnAdder;
/// use etl_processor::etl::Transformer;
/// use serde_json::json;
///
/// let adder = ColumnAdder::new().with("source", json!("movies"));
/// let record = json!({"title": "Heat"}).as_object().unwrap().clone();
///
/// let output = adder.transform(record).unwrap();
/// assert_eq!(output["source"], "movies");
/// ```
#[derive(Default)]
pub struct ColumnAdder {
    columns: Map<String, Value>,
}

impl ColumnAdder {
    /// Create an adder with no columns
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(columns: Map<String, Value>) -> Self {
        Self { columns }
    }

    /// Add one column to set
    pub fn with(mut self, name: impl Into<String>, value: Value) -> Self {
        self.columns.insert(name.into(), value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl Transformer for ColumnAdder {
    type Input = Record;
    type Output = Record;

    fn transform(&self, mut input: Self::Input) -> Result<Self::Output> {
        for (name, value) in &self.columns {
            input.insert(name.clone(), value.clone());
        }
        Ok(input)
    }

    fn is_identity(&self) -> bool {
        self.is_empty()
    }
}
