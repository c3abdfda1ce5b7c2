//! Dataset summaries
//!
//! A [`Summary`] is a diagnostic snapshot: counts, first-record column
//! types, a short sample, and missing values per column. It renders as a
//! human-readable report through `Display`.

use crate::dataset::{Dataset, type_name};
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Records kept verbatim in a summary
pub const SAMPLE_SIZE: usize = 3;

/// Per-column statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub name: String,
    /// Type of the first record's value in this column
    pub type_name: String,
    /// Records where the value is absent, null, or an empty string
    pub missing: usize,
}

/// Snapshot of a dataset at one point of the pipeline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub title: String,
    pub record_count: usize,
    pub column_count: usize,
    pub columns: Vec<ColumnSummary>,
    pub sample: Vec<Value>,
    /// JSON kind of a non-tabular document, `None` for tables
    pub document_kind: Option<String>,
}

impl Summary {
    fn empty(title: &str) -> Self {
        Self {
            title: title.to_string(),
            record_count: 0,
            column_count: 0,
            columns: Vec::new(),
            sample: Vec::new(),
            document_kind: None,
        }
    }

    /// True when there was no data to summarize
    pub fn is_empty(&self) -> bool {
        self.record_count == 0
    }

    pub fn column(&self, name: &str) -> Option<&ColumnSummary> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// Summarize a dataset; never fails
///
/// Type inference looks at the first record only and is not checked
/// against the rest of the data.
pub fn summarize(dataset: Option<&Dataset>, title: &str) -> Summary {
    let dataset = match dataset {
        Some(dataset) if !dataset.is_empty() => dataset,
        _ => return Summary::empty(title),
    };

    let records = match dataset {
        Dataset::Table(records) => records,
        Dataset::Document(value) => {
            let sample = match value {
                Value::Array(items) => items.iter().take(SAMPLE_SIZE).cloned().collect(),
                other => vec![other.clone()],
            };
            return Summary {
                record_count: dataset.len(),
                sample,
                document_kind: Some(type_name(value).to_string()),
                ..Summary::empty(title)
            };
        }
    };

    let columns: Vec<ColumnSummary> = records[0]
        .iter()
        .map(|(name, value)| ColumnSummary {
            name: name.clone(),
            type_name: type_name(value).to_string(),
            missing: records
                .iter()
                .filter(|record| match record.get(name) {
                    None | Some(Value::Null) => true,
                    Some(Value::String(s)) => s.is_empty(),
                    Some(_) => false,
                })
                .count(),
        })
        .collect();

    Summary {
        title: title.to_string(),
        record_count: records.len(),
        column_count: columns.len(),
        columns,
        sample: records
            .iter()
            .take(SAMPLE_SIZE)
            .cloned()
            .map(Value::Object)
            .collect(),
        document_kind: None,
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "No data available for {}.", self.title);
        }

        if let Some(kind) = &self.document_kind {
            writeln!(
                f,
                "{} - JSON {} with {} top-level item(s), not tabular",
                self.title, kind, self.record_count
            )?;
            writeln!(f, "Sample:")?;
            for value in &self.sample {
                writeln!(f, "  {}", value)?;
            }
            return Ok(());
        }

        writeln!(
            f,
            "{} - Records: {}, Columns: {}",
            self.title, self.record_count, self.column_count
        )?;

        writeln!(f, "Column Names and Types:")?;
        for column in &self.columns {
            writeln!(f, "  - {}: {}", column.name, column.type_name)?;
        }

        writeln!(f, "\nSample Records (First {} Rows):", SAMPLE_SIZE)?;
        for (i, record) in self.sample.iter().enumerate() {
            writeln!(f, "  Record {}: {}", i + 1, record)?;
        }

        writeln!(f, "\nMissing Values by Column:")?;
        for column in &self.columns {
            writeln!(f, "  - {}: {} missing values", column.name, column.missing)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_dataset() {
        let summary = summarize(None, "Pre-Processing Data Summary");
        assert!(summary.is_empty());
        assert_eq!(
            summary.to_string(),
            "No data available for Pre-Processing Data Summary."
        );
    }

    #[test]
    fn test_empty_table() {
        let dataset = Dataset::Table(vec![]);
        let summary = summarize(Some(&dataset), "Empty");
        assert!(summary.is_empty());
        assert!(summary.to_string().starts_with("No data available"));
    }

    #[test]
    fn test_counts_and_types() {
        let dataset = Dataset::from_value(json!([
            {"name": "Heat", "year": 1995, "rating": 8.3, "note": ""},
            {"name": "Ronin", "year": null, "rating": 7.2},
            {"name": "", "year": 1998, "rating": 7.0, "note": "x"},
            {"name": "Collateral", "year": 2004, "rating": 7.5, "note": "y"}
        ]));

        let summary = summarize(Some(&dataset), "Movies");
        assert_eq!(summary.record_count, 4);
        assert_eq!(summary.column_count, 4);
        assert_eq!(summary.sample.len(), SAMPLE_SIZE);

        assert_eq!(summary.column("name").unwrap().type_name, "string");
        assert_eq!(summary.column("year").unwrap().type_name, "integer");
        assert_eq!(summary.column("rating").unwrap().type_name, "float");

        assert_eq!(summary.column("name").unwrap().missing, 1);
        assert_eq!(summary.column("year").unwrap().missing, 1);
        assert_eq!(summary.column("rating").unwrap().missing, 0);
        // "" in the first record and absent in the second
        assert_eq!(summary.column("note").unwrap().missing, 2);
    }

    #[test]
    fn test_columns_come_from_first_record() {
        let dataset = Dataset::from_value(json!([{"a": 1}, {"a": 2, "b": 3}]));
        let summary = summarize(Some(&dataset), "Ragged");
        assert_eq!(summary.column_count, 1);
        assert!(summary.column("b").is_none());
    }

    #[test]
    fn test_rendered_report() {
        let dataset = Dataset::from_value(json!([{"a": "1", "b": ""}]));
        let text = summarize(Some(&dataset), "Report").to_string();

        assert!(text.contains("Report - Records: 1, Columns: 2"));
        assert!(text.contains("  - a: string"));
        assert!(text.contains("Record 1: {\"a\":\"1\",\"b\":\"\"}"));
        assert!(text.contains("  - b: 1 missing values"));
    }

    #[test]
    fn test_document_summary() {
        let dataset = Dataset::from_value(json!({"status": "ok", "count": 3}));
        let summary = summarize(Some(&dataset), "Doc");
        assert_eq!(summary.document_kind.as_deref(), Some("object"));
        assert_eq!(summary.record_count, 2);
        assert!(summary.columns.is_empty());
        assert!(summary.to_string().contains("not tabular"));
    }
}
