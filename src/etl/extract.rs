//! Extractor trait for data extraction from various sources

use crate::dataset::Dataset;
use crate::error::Result;

/// Extractor trait for producing a [`Dataset`] from a source
///
/// Implementors define how to acquire data from sources like:
/// - Local CSV and JSON files
/// - Remote files downloaded over HTTP
/// - REST API endpoints
///
/// # Example
/// ```no_run
/// use etl_processor::dataset::Dataset;
/// use etl_processor::error::Result;
/// use etl_processor::etl::Extractor;
///
/// struct StaticExtractor(Vec<serde_json::Map<String, serde_json::Value>>);
///
/// impl Extractor for StaticExtractor {
///     async fn extract(&self) -> Result<Dataset> {
///         Ok(Dataset::Table(self.0.clone()))
///     }
/// }
/// ```
pub trait Extractor: Send + Sync {
    /// Extract the full dataset from the source
    ///
    /// # Errors
    /// Returns an error if extraction fails (network, I/O, parsing, etc.).
    /// Partial data is never returned.
    fn extract(&self) -> impl std::future::Future<Output = Result<Dataset>> + Send;

    /// Human-readable description of the source, used in log lines
    fn describe(&self) -> String {
        "source".to_string()
    }
}
