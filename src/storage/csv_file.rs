//! CSV file operations

use crate::dataset::{Dataset, Record};
use crate::error::{EtlError, Result};
use crate::etl::{Extractor, Loader, SaveReport};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Read CSV rows as records keyed by the header row
pub struct CsvReader {
    path: PathBuf,
}

impl CsvReader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Read all rows
    ///
    /// Values stay text. A row shorter than the header gets null for the
    /// missing trailing columns; a longer row is a parse error.
    pub fn read(&self) -> Result<Vec<Record>> {
        let target = self.path.display().to_string();
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(&self.path)
            .map_err(|e| EtlError::parse_from(&target, e))?;

        let headers = reader
            .headers()
            .map_err(|e| EtlError::parse_from(&target, e))?
            .clone();

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row.map_err(|e| EtlError::parse_from(&target, e))?;
            if row.len() > headers.len() {
                let line = row.position().map(|p| p.line()).unwrap_or_default();
                return Err(EtlError::parse(
                    &target,
                    format!(
                        "line {} has {} fields but the header has {}",
                        line,
                        row.len(),
                        headers.len()
                    ),
                ));
            }

            let record: Record = headers
                .iter()
                .enumerate()
                .map(|(i, name)| {
                    let value = row
                        .get(i)
                        .map(|v| Value::String(v.to_string()))
                        .unwrap_or(Value::Null);
                    (name.to_string(), value)
                })
                .collect();
            records.push(record);
        }

        log::debug!("Read {} CSV row(s) from {}", records.len(), target);
        Ok(records)
    }
}

// Implement Extractor trait for reading CSV files

impl Extractor for CsvReader {
    async fn extract(&self) -> Result<Dataset> {
        Ok(Dataset::Table(self.read()?))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Write records as CSV, using the first record's keys as the header
pub struct CsvWriter {
    path: PathBuf,
}

impl CsvWriter {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write header and rows; an empty slice writes nothing
    ///
    /// Returns the number of rows written.
    pub fn write(&self, records: &[Record]) -> Result<usize> {
        let Some(first) = records.first() else {
            log::warn!("No data to write to CSV.");
            return Ok(0);
        };

        let target = self.path.display().to_string();
        let header: Vec<&String> = first.keys().collect();
        let mut writer =
            csv::Writer::from_path(&self.path).map_err(|e| EtlError::write_from(&target, e))?;

        writer
            .write_record(&header)
            .map_err(|e| EtlError::write_from(&target, e))?;

        let mut dropped = 0;
        for record in records {
            dropped += record.keys().filter(|k| !header.contains(k)).count();
            let row: Vec<String> = header
                .iter()
                .map(|column| render_cell(record.get(*column)))
                .collect();
            writer
                .write_record(&row)
                .map_err(|e| EtlError::write_from(&target, e))?;
        }
        writer.flush().map_err(|e| EtlError::write_from(&target, e))?;

        if dropped > 0 {
            log::warn!(
                "Dropped {} value(s) whose column is not in the CSV header",
                dropped
            );
        }
        log::info!("Data saved as CSV to {}", target);
        Ok(records.len())
    }
}

/// Render a value as CSV cell text
fn render_cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

// Implement Loader trait for writing CSV files

impl Loader for CsvWriter {
    async fn load(&self, dataset: &Dataset) -> Result<SaveReport> {
        let records = dataset.records().ok_or_else(|| {
            EtlError::write(self.path.display().to_string(), "dataset is not tabular")
        })?;
        match self.write(records)? {
            0 => Ok(SaveReport::skipped("csv")),
            rows => Ok(SaveReport::written("csv", &self.path, rows)),
        }
    }
}
