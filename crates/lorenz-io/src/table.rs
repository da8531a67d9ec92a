//! Tabular data capability and common error types
//!
//! The `TabularData` trait is the single boundary between a concrete table
//! backend and the computations that consume it. Backends expose their
//! numeric columns as owned `f64` vectors; sorting, arithmetic and
//! aggregation happen on the consumer's side.

use crate::schema::{ColumnDescriptor, ColumnType, DataSchema};
use thiserror::Error;

/// Errors that can occur at the tabular data boundary
#[derive(Debug, Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Failed to open file: {0}")]
    OpenFailed(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Type mismatch for column '{column}': expected {expected}, got {actual}")]
    TypeMismatch {
        column: String,
        expected: String,
        actual: String,
    },

    #[error("Length mismatch for column '{column}': expected {expected} rows, got {actual}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("I/O error: {0}")]
    Io(String),
}

/// Result type for tabular data operations
pub type IoResult<T> = Result<T, IoError>;

/// Capability required from any table backend
///
/// Implementations must hand out copies: callers are free to reorder and
/// rescale what they receive without affecting the table.
pub trait TabularData: Send + Sync {
    /// Number of rows
    fn num_rows(&self) -> usize;

    /// Column names in table order
    fn column_names(&self) -> Vec<&str>;

    /// Type of a named column, `None` if it does not exist
    fn column_type(&self, name: &str) -> Option<ColumnType>;

    /// Copy a numeric column out as `f64` values
    fn column_f64(&self, name: &str) -> IoResult<Vec<f64>>;

    /// Short backend name for diagnostics
    fn backend_name(&self) -> &'static str;

    /// Check whether a column exists
    fn has_column(&self, name: &str) -> bool {
        self.column_type(name).is_some()
    }

    /// Check if the table has no rows
    fn is_empty(&self) -> bool {
        self.num_rows() == 0
    }

    /// Describe the table
    fn schema(&self) -> DataSchema {
        let columns = self
            .column_names()
            .into_iter()
            .filter_map(|name| {
                self.column_type(name)
                    .map(|dtype| ColumnDescriptor::new(name, dtype))
            })
            .collect();
        DataSchema::new(columns, self.num_rows())
    }
}

/// A boxed table for dynamic dispatch
pub type BoxedTable = Box<dyn TabularData>;

/// Open a file and load it into an in-memory table
///
/// The format is auto-detected from the file extension.
pub fn open_file(path: &str) -> IoResult<BoxedTable> {
    let extension = path
        .rsplit('.')
        .next()
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        #[cfg(feature = "csv")]
        "csv" => {
            use crate::csv_reader::CsvReader;
            Ok(Box::new(CsvReader::open(path)?.into_frame()))
        }

        #[cfg(feature = "csv")]
        "tsv" => {
            use crate::csv_reader::CsvReader;
            Ok(Box::new(
                CsvReader::open_with_options(path, b'\t', true)?.into_frame(),
            ))
        }

        _ => Err(IoError::InvalidFormat(format!(
            "Unknown file extension: {}",
            extension
        ))),
    }
}

/// List supported file extensions
pub fn supported_extensions() -> Vec<&'static str> {
    let mut extensions = Vec::new();

    #[cfg(feature = "csv")]
    {
        extensions.push("csv");
        extensions.push("tsv");
    }

    extensions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_extensions() {
        let extensions = supported_extensions();
        #[cfg(feature = "csv")]
        assert!(extensions.contains(&"csv"));
        #[cfg(not(feature = "csv"))]
        assert!(extensions.is_empty());
    }

    #[test]
    fn test_open_unknown_extension() {
        let err = open_file("policies.xlsx").err().unwrap();
        assert!(matches!(err, IoError::InvalidFormat(_)));
        assert!(err.to_string().contains("xlsx"));
    }
}
