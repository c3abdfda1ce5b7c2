//! Output format selection
//!
//! A [`SinkSpec`] holds the caller's raw format selector plus destination.
//! It is resolved into a concrete [`Sink`] only when the pipeline reaches
//! its save step, so an unrecognized selector aborts without any output.

use crate::dataset::Dataset;
use crate::error::{EtlError, Result};
use crate::etl::{Loader, SaveReport};
use crate::storage::{CsvWriter, DEFAULT_TABLE, JsonWriter, SqliteWriter};
use std::path::PathBuf;
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Csv,
    Json,
    Sqlite,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
            OutputFormat::Sqlite => "sqlite",
        }
    }

    /// Destination used when the caller gives none
    pub fn default_destination(&self) -> PathBuf {
        match self {
            OutputFormat::Csv => PathBuf::from("output_data.csv"),
            OutputFormat::Json => PathBuf::from("output_data.json"),
            OutputFormat::Sqlite => PathBuf::from("output_data.db"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = EtlError;

    /// Case-insensitive, surrounding whitespace ignored
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            "sqlite" => Ok(OutputFormat::Sqlite),
            _ => Err(EtlError::UnsupportedFormat(format!(
                "unsupported output format '{}' (expected csv, json or sqlite)",
                s.trim()
            ))),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Unresolved output selection
#[derive(Debug, Clone, PartialEq)]
pub struct SinkSpec {
    /// Raw selector, e.g. from a flag or a prompt
    pub format: String,
    pub destination: Option<PathBuf>,
    /// Table name for the SQLite sink
    pub table: String,
}

impl SinkSpec {
    pub fn new(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
            destination: None,
            table: DEFAULT_TABLE.to_string(),
        }
    }

    pub fn with_destination(mut self, destination: impl Into<PathBuf>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    /// Turn the selector into a writer; performs no I/O
    pub fn resolve(&self) -> Result<Sink> {
        let format: OutputFormat = self.format.parse()?;
        let destination = self
            .destination
            .clone()
            .unwrap_or_else(|| format.default_destination());

        Ok(match format {
            OutputFormat::Csv => Sink::Csv(CsvWriter::new(destination)),
            OutputFormat::Json => Sink::Json(JsonWriter::new(destination)),
            OutputFormat::Sqlite => Sink::Sqlite(SqliteWriter::new(destination, &self.table)),
        })
    }
}

/// A resolved output writer
pub enum Sink {
    Csv(CsvWriter),
    Json(JsonWriter),
    Sqlite(SqliteWriter),
}

impl Sink {
    pub fn format(&self) -> OutputFormat {
        match self {
            Sink::Csv(_) => OutputFormat::Csv,
            Sink::Json(_) => OutputFormat::Json,
            Sink::Sqlite(_) => OutputFormat::Sqlite,
        }
    }
}

impl Loader for Sink {
    async fn load(&self, dataset: &Dataset) -> Result<SaveReport> {
        match self {
            Sink::Csv(writer) => writer.load(dataset).await,
            Sink::Json(writer) => writer.load(dataset).await,
            Sink::Sqlite(writer) => writer.load(dataset).await,
        }
    }
}
