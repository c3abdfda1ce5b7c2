//! File system storage operations
//!
//! This module handles all file I/O operations including:
//! - CSV file reading/writing
//! - JSON file reading/writing
//! - SQLite table writing

mod csv_file;
mod json;
mod sqlite;

pub use csv_file::{CsvReader, CsvWriter};
pub use json::{JsonReader, JsonWriter, to_string_indented};
pub use sqlite::{DEFAULT_TABLE, SqliteWriter};
