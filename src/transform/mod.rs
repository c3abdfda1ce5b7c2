//! Column transformations applied between loading and saving
//!
//! Removal always runs before addition, so an added column may reuse the
//! name of one that was just removed.

mod column_adder;
mod column_remover;

pub use column_adder::ColumnAdder;
pub use column_remover::ColumnRemover;

use crate::dataset::Record;
use crate::error::Result;
use crate::etl::Transformer;
use serde_json::{Map, Value};

/// Requested column changes for one run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformSpec {
    pub remove: Vec<String>,
    pub add: Map<String, Value>,
    /// Reject removal of columns the dataset does not have
    pub strict: bool,
}

impl TransformSpec {
    pub fn remove<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.remove.extend(columns.into_iter().map(Into::into));
        self
    }

    pub fn add(mut self, name: impl Into<String>, value: Value) -> Self {
        self.add.insert(name.into(), value);
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.remove.is_empty() && self.add.is_empty()
    }
}

/// Removal followed by addition, as a single transformer
pub struct ColumnTransform {
    remover: ColumnRemover,
    adder: ColumnAdder,
}

impl ColumnTransform {
    pub fn new(spec: TransformSpec) -> Self {
        Self {
            remover: ColumnRemover::from_names(spec.remove).strict(spec.strict),
            adder: ColumnAdder::from_map(spec.add),
        }
    }
}

impl Transformer for ColumnTransform {
    type Input = Record;
    type Output = Record;

    fn transform(&self, input: Self::Input) -> Result<Self::Output> {
        let removed = self.remover.transform(input)?;
        self.adder.transform(removed)
    }

    fn validate(&self, columns: &[String]) -> Result<()> {
        self.remover.validate(columns)?;
        self.adder.validate(columns)
    }

    fn is_identity(&self) -> bool {
        self.remover.is_identity() && self.adder.is_identity()
    }
}
