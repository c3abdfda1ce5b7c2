//! JSON file operations

use crate::dataset::Dataset;
use crate::error::{EtlError, Result};
use crate::etl::{Extractor, Loader, SaveReport};
use serde::Serialize;
use serde_json::Value;
use serde_json::ser::PrettyFormatter;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Read a JSON file into a dataset
pub struct JsonReader {
    path: PathBuf,
}

impl JsonReader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Decode the whole file
    pub fn read(&self) -> Result<Value> {
        let target = self.path.display().to_string();
        let content = std::fs::read_to_string(&self.path).map_err(|e| EtlError::parse_from(&target, e))?;
        serde_json::from_str(&content).map_err(|e| EtlError::parse_from(&target, e))
    }
}

// Implement Extractor trait for reading JSON files

impl Extractor for JsonReader {
    async fn extract(&self) -> Result<Dataset> {
        Ok(Dataset::from_value(self.read()?))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Write a dataset as indented JSON
pub struct JsonWriter {
    path: PathBuf,
}

impl JsonWriter {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write any serializable value with 4-space indentation
    pub fn write(&self, value: &impl Serialize) -> Result<()> {
        let target = self.path.display().to_string();
        let content = to_string_indented(value).map_err(|e| EtlError::write_from(&target, e))?;

        let mut file = std::fs::File::create(&self.path).map_err(|e| EtlError::write_from(&target, e))?;
        file.write_all(content.as_bytes())
            .and_then(|_| file.write_all(b"\n"))
            .map_err(|e| EtlError::write_from(&target, e))?;

        log::info!("Data saved as JSON to {}", target);
        Ok(())
    }
}

/// Serialize with 4-space indentation
pub fn to_string_indented(value: &impl Serialize) -> serde_json::Result<String> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;
    // serde_json only ever emits valid UTF-8
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

// Implement Loader trait for writing JSON files

impl Loader for JsonWriter {
    async fn load(&self, dataset: &Dataset) -> Result<SaveReport> {
        self.write(dataset)?;
        Ok(SaveReport::written("json", &self.path, dataset.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_read_write() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("data.json");
        let data = Dataset::from_value(json!([{"b": 1, "a": "x"}, {"b": 2, "a": "y"}]));

        JsonWriter::new(&path).write(&data).unwrap();
        let read_back = Dataset::from_value(JsonReader::new(&path).read().unwrap());

        assert_eq!(read_back, data);
    }

    #[test]
    fn test_four_space_indent() {
        let text = to_string_indented(&json!([{"a": "1"}])).unwrap();
        assert_eq!(text, "[\n    {\n        \"a\": \"1\"\n    }\n]");
    }

    #[test]
    fn test_empty_table_writes_brackets() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("empty.json");

        JsonWriter::new(&path).write(&Dataset::Table(vec![])).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]\n");
    }

    #[test]
    fn test_document_written_as_is() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("doc.json");
        let doc = json!({"status": "ok", "items": [1, 2]});

        JsonWriter::new(&path)
            .write(&Dataset::Document(doc.clone()))
            .unwrap();
        assert_eq!(JsonReader::new(&path).read().unwrap(), doc);
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.json");
        std::fs::write(&path, "{\"a\": ").unwrap();

        let err = JsonReader::new(&path).read().unwrap_err();
        assert_eq!(err.kind(), "ParseError");
    }

    #[test]
    fn test_write_to_missing_directory_is_write_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nope").join("out.json");

        let err = JsonWriter::new(&path).write(&json!([])).unwrap_err();
        assert_eq!(err.kind(), "WriteError");
    }
}
