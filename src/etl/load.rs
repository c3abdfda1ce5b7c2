//! Loader trait for persisting data to destinations

use crate::dataset::Dataset;
use crate::error::Result;
use serde::Serialize;
use std::path::PathBuf;

/// Outcome of a single save
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaveReport {
    /// Selected output format (`csv`, `json`, `sqlite`)
    pub format: String,
    /// Where the data went; `None` when there was nothing to write
    pub destination: Option<PathBuf>,
    /// Number of records written
    pub rows: usize,
}

impl SaveReport {
    pub fn written(format: impl Into<String>, destination: impl Into<PathBuf>, rows: usize) -> Self {
        Self {
            format: format.into(),
            destination: Some(destination.into()),
            rows,
        }
    }

    pub fn skipped(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
            destination: None,
            rows: 0,
        }
    }
}

/// Loader trait for writing a dataset to a destination
///
/// Implementors define how to persist data:
/// - CSV files
/// - JSON files
/// - Relational tables
///
/// # Example
/// ```no_run
/// use etl_processor::dataset::Dataset;
/// use etl_processor::error::Result;
/// use etl_processor::etl::{Loader, SaveReport};
///
/// struct CountingLoader;
///
/// impl Loader for CountingLoader {
///     async fn load(&self, dataset: &Dataset) -> Result<SaveReport> {
///         Ok(SaveReport::written("memory", "/dev/null", dataset.len()))
///     }
/// }
/// ```
pub trait Loader: Send + Sync {
    /// Persist the dataset
    ///
    /// # Errors
    /// Returns an error if writing fails (I/O, database, wrong data shape)
    fn load(&self, dataset: &Dataset) -> impl std::future::Future<Output = Result<SaveReport>> + Send;
}
