//! Column remover transformer
//!
//! Removes named columns from every record.

use crate::dataset::Record;
use crate::error::{EtlError, Result};
use crate::etl::Transformer;

/// Transformer that drops named columns from records
///
/// Removal is a filter: a record that lacks one of the named columns is
/// left as-is. In strict mode, [`Transformer::validate`] rejects any named
/// column that is not in the dataset's column set.
///
/// # Example
/// ```
/// use etl_processor::transform::ColumnRemover;
/// use etl_processor::etl::Transformer;
/// use serde_json::json;
///
/// let remover = ColumnRemover::new(vec!["b"]);
/// let record = json!({"a": "1", "b": "2"}).as_object().unwrap().clone();
///
/// let output = remover.transform(record).unwrap();
/// assert!(!output.contains_key("b"));
/// assert_eq!(output["a"], "1");
/// ```
pub struct ColumnRemover {
    columns: Vec<String>,
    strict: bool,
}

impl ColumnRemover {
    /// Create a new remover for the given columns
    pub fn new(columns: Vec<&str>) -> Self {
        Self::from_names(columns.into_iter().map(String::from).collect())
    }

    pub fn from_names(columns: Vec<String>) -> Self {
        Self {
            columns,
            strict: false,
        }
    }

    /// Fail validation when a named column is absent from the dataset
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl Transformer for ColumnRemover {
    type Input = Record;
    type Output = Record;

    fn transform(&self, mut input: Self::Input) -> Result<Self::Output> {
        input.retain(|key, _| !self.columns.contains(key));
        Ok(input)
    }

    fn validate(&self, columns: &[String]) -> Result<()> {
        if !self.strict {
            return Ok(());
        }
        let missing: Vec<&str> = self
            .columns
            .iter()
            .filter(|name| !columns.contains(name))
            .map(String::as_str)
            .collect();
        if !missing.is_empty() {
            return Err(EtlError::Transform(format!(
                "cannot remove missing column(s): {}",
                missing.join(", ")
            )));
        }
        Ok(())
    }

    fn is_identity(&self) -> bool {
        self.is_empty()
    }
}
