//! ETL Processor
//!
//! Loads CSV or JSON from a local file, a remote URL, or an API endpoint,
//! optionally removes and adds columns, and saves the result as CSV, JSON,
//! or an SQLite table.

pub mod cli;
pub mod client;
pub mod dataset;
pub mod error;
pub mod etl;
pub mod processor;
pub mod sink;
pub mod source;
pub mod storage;
pub mod summary;
pub mod transform;

// Re-exports for convenience
pub use client::{Auth, HttpClient};
pub use dataset::{Dataset, Record};
pub use error::{EtlError, Result};
pub use etl::{Extractor, IdentityTransformer, Loader, Pipeline, RunReport, RunStatus, Transformer};
pub use processor::{EtlRequest, etl_processor};
pub use sink::{OutputFormat, SinkSpec};
pub use source::{Source, SourceExtractor};
pub use storage::{CsvReader, CsvWriter, JsonReader, JsonWriter, SqliteWriter};
pub use summary::{Summary, summarize};
pub use transform::{ColumnAdder, ColumnRemover, ColumnTransform, TransformSpec};
