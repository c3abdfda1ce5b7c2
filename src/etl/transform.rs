//! Transformer trait for data transformation

use crate::error::Result;

/// Transformer trait for transforming data items
///
/// Implementors define how to transform items:
/// - Data cleaning (removing columns)
/// - Data enrichment (adding columns)
///
/// # Example
/// ```no_run
/// use etl_processor::etl::Transformer;
/// use etl_processor::error::Result;
/// use etl_processor::dataset::Record;
///
/// struct ColumnDropper {
///     columns: Vec<String>,
/// }
///
/// impl Transformer for ColumnDropper {
///     type Input = Record;
///     type Output = Record;
///
///     fn transform(&self, mut input: Self::Input) -> Result<Self::Output> {
///         input.retain(|key, _| !self.columns.contains(key));
///         Ok(input)
///     }
/// }
/// ```
pub trait Transformer: Send + Sync {
    /// Input item type
    type Input: Send;

    /// Output item type after transformation
    type Output: Send;

    /// Transform a single item
    ///
    /// # Errors
    /// Returns an error if transformation fails
    fn transform(&self, input: Self::Input) -> Result<Self::Output>;

    /// Transform multiple items (default batch implementation)
    fn transform_many(&self, inputs: Vec<Self::Input>) -> Result<Vec<Self::Output>> {
        inputs.into_iter().map(|i| self.transform(i)).collect()
    }

    /// Check the transform against the dataset's column set before any item is touched
    ///
    /// The default accepts every column set.
    fn validate(&self, _columns: &[String]) -> Result<()> {
        Ok(())
    }

    /// Whether this transformer leaves every item unchanged
    fn is_identity(&self) -> bool {
        false
    }
}

/// Identity transformer that passes items through unchanged
///
/// Use this when you need a transformer but don't want to modify the data.
/// The generic parameter T must be specified when creating the transformer.
pub struct IdentityTransformer<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Default for IdentityTransformer<T> {
    fn default() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<T> IdentityTransformer<T> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T: Send + Sync> Transformer for IdentityTransformer<T> {
    type Input = T;
    type Output = T;

    fn transform(&self, input: Self::Input) -> Result<Self::Output> {
        Ok(input)
    }

    fn is_identity(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_transformer() {
        let transformer = IdentityTransformer::<i32>::new();
        let input = vec![1, 2, 3];
        let output = transformer.transform_many(input.clone()).unwrap();
        assert_eq!(input, output);
        assert!(transformer.is_identity());
    }

    #[test]
    fn test_default_validate_accepts_anything() {
        let transformer = IdentityTransformer::<i32>::new();
        assert!(transformer.validate(&["a".to_string()]).is_ok());
        assert!(transformer.validate(&[]).is_ok());
    }
}
