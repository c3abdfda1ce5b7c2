//! SQLite table storage

use crate::dataset::{Dataset, Record};
use crate::error::{EtlError, Result};
use crate::etl::{Loader, SaveReport};
use rusqlite::Connection;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Default table name for saved datasets
pub const DEFAULT_TABLE: &str = "processed_data";

/// Write records into an SQLite table with one TEXT column per key
///
/// The table is created from the first record's keys if it does not exist.
/// Values are matched to columns by name, so records with a different key
/// order still land in the right columns. Rows are inserted in a single
/// transaction committed at the end; a failure leaves the created table in
/// place without any of the new rows.
pub struct SqliteWriter {
    path: PathBuf,
    table: String,
}

impl SqliteWriter {
    pub fn new(path: impl AsRef<Path>, table: impl Into<String>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            table: table.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Insert all records, returning the number of rows written
    pub fn write(&self, records: &[Record]) -> Result<usize> {
        let Some(first) = records.first() else {
            log::warn!("No data to write to SQLite.");
            return Ok(0);
        };

        let target = format!("{} (table {})", self.path.display(), self.table);
        let err = |e: rusqlite::Error| EtlError::write_from(&target, e);

        let columns: Vec<&String> = first.keys().collect();
        let table = quote_identifier(&self.table);
        let quoted: Vec<String> = columns.iter().map(|c| quote_identifier(c)).collect();

        let mut conn = Connection::open(&self.path).map_err(err)?;

        let definitions: Vec<String> = quoted.iter().map(|c| format!("{} TEXT", c)).collect();
        let create = format!(
            "CREATE TABLE IF NOT EXISTS {} ({})",
            table,
            definitions.join(", ")
        );
        log::debug!("{}", create);
        conn.execute(&create, []).map_err(err)?;

        let placeholders = vec!["?"; columns.len()].join(", ");
        let insert = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            table,
            quoted.join(", "),
            placeholders
        );

        let tx = conn.transaction().map_err(err)?;
        let mut dropped = 0;
        {
            let mut statement = tx.prepare(&insert).map_err(err)?;
            for record in records {
                dropped += record.keys().filter(|k| !columns.contains(k)).count();
                let values: Vec<Option<String>> = columns
                    .iter()
                    .map(|column| render_text(record.get(*column)))
                    .collect();
                statement
                    .execute(rusqlite::params_from_iter(values.iter()))
                    .map_err(err)?;
            }
        }
        tx.commit().map_err(err)?;

        if dropped > 0 {
            log::warn!(
                "Dropped {} value(s) whose column is not in table {}",
                dropped,
                self.table
            );
        }
        log::info!(
            "Data saved to SQLite database: {}, Table: {}",
            self.path.display(),
            self.table
        );
        Ok(records.len())
    }
}

/// Quote an SQL identifier, doubling embedded quotes
fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn render_text(value: Option<&Value>) -> Option<String> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => Some(other.to_string()),
    }
}

impl Loader for SqliteWriter {
    async fn load(&self, dataset: &Dataset) -> Result<SaveReport> {
        let records = dataset.records().ok_or_else(|| {
            EtlError::write(self.path.display().to_string(), "dataset is not tabular")
        })?;
        match self.write(records)? {
            0 => Ok(SaveReport::skipped("sqlite")),
            rows => Ok(SaveReport::written("sqlite", &self.path, rows)),
        }
    }
}
