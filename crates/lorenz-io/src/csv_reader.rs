//! CSV file reader with type inference

use crate::frame::DataFrame;
use crate::schema::{ColumnType, DataColumn, DataSchema};
use crate::table::{IoError, IoResult, TabularData};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// CSV file reader
///
/// The whole file is loaded into a `DataFrame`; column types are inferred
/// from every value in the column.
pub struct CsvReader {
    path: Option<String>,
    frame: DataFrame,
    delimiter: u8,
}

impl CsvReader {
    /// Open a CSV file
    pub fn open(path: &str) -> IoResult<Self> {
        Self::open_with_options(path, b',', true)
    }

    /// Open a CSV file with options
    pub fn open_with_options(path: &str, delimiter: u8, has_header: bool) -> IoResult<Self> {
        if !Path::new(path).exists() {
            return Err(IoError::FileNotFound(path.to_string()));
        }

        let file = File::open(path).map_err(|e| IoError::OpenFailed(e.to_string()))?;
        let mut reader = Self::from_reader(BufReader::new(file), delimiter, has_header)?;
        reader.path = Some(path.to_string());
        Ok(reader)
    }

    /// Read CSV data from any reader
    pub fn from_reader<R: Read>(input: R, delimiter: u8, has_header: bool) -> IoResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(has_header)
            .from_reader(input);

        let mut headers = if has_header {
            reader
                .headers()
                .map_err(|e| IoError::InvalidFormat(e.to_string()))?
                .iter()
                .map(|s| s.trim().to_string())
                .collect::<Vec<_>>()
        } else {
            Vec::new()
        };

        let mut values: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
        for (line, result) in reader.records().enumerate() {
            let record = result.map_err(|e| IoError::InvalidFormat(e.to_string()))?;

            if !has_header && headers.is_empty() {
                // Generate column names
                headers = (0..record.len()).map(|i| format!("col_{}", i)).collect();
                values = vec![Vec::new(); headers.len()];
            }

            if record.len() != headers.len() {
                return Err(IoError::InvalidFormat(format!(
                    "record {} has {} fields, expected {}",
                    line + 1,
                    record.len(),
                    headers.len()
                )));
            }
            for (i, value) in record.iter().enumerate() {
                values[i].push(value.trim().to_string());
            }
        }

        let mut frame = DataFrame::new();
        for (name, column) in headers.into_iter().zip(values) {
            let dtype = infer_type(&column);
            frame.add_column(name, parse_column(&column, dtype))?;
        }

        Ok(Self {
            path: None,
            frame,
            delimiter,
        })
    }

    /// Get the inferred schema
    pub fn read_schema(&self) -> DataSchema {
        self.frame.schema()
    }

    /// Get the file path (if read from a file)
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Field delimiter
    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    /// Borrow the loaded table
    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// Take ownership of the loaded table
    pub fn into_frame(self) -> DataFrame {
        self.frame
    }
}

impl TabularData for CsvReader {
    fn num_rows(&self) -> usize {
        self.frame.num_rows()
    }

    fn column_names(&self) -> Vec<&str> {
        self.frame.column_names()
    }

    fn column_type(&self, name: &str) -> Option<ColumnType> {
        self.frame.column_type(name)
    }

    fn column_f64(&self, name: &str) -> IoResult<Vec<f64>> {
        self.frame.column_f64(name)
    }

    fn backend_name(&self) -> &'static str {
        "CSV"
    }
}

/// Infer column type from its values
///
/// Empty cells are treated as missing: an integer column with gaps is
/// widened to `Float64` so the gaps can be represented as NaN. A column
/// with no records at all is numeric.
fn infer_type(values: &[String]) -> ColumnType {
    if values.is_empty() {
        return ColumnType::Float64;
    }

    let non_empty: Vec<&str> = values
        .iter()
        .map(|s| s.as_str())
        .filter(|s| !s.is_empty())
        .collect();
    if non_empty.is_empty() {
        return ColumnType::String;
    }
    let has_missing = non_empty.len() < values.len();

    // Try parsing as integers
    if non_empty.iter().all(|s| s.parse::<i64>().is_ok()) {
        return if has_missing {
            ColumnType::Float64
        } else {
            ColumnType::Int64
        };
    }

    // Try parsing as floats
    if non_empty.iter().all(|s| s.parse::<f64>().is_ok()) {
        return ColumnType::Float64;
    }

    // Try parsing as booleans
    if non_empty.iter().all(|s| {
        matches!(
            s.to_lowercase().as_str(),
            "true" | "false" | "yes" | "no"
        )
    }) {
        return ColumnType::Bool;
    }

    ColumnType::String
}

/// Parse column values into a DataColumn
///
/// `infer_type` only yields the 64-bit numeric types; narrower requests are
/// parsed at 64-bit width.
fn parse_column(values: &[String], dtype: ColumnType) -> DataColumn {
    match dtype {
        ColumnType::Float32 | ColumnType::Float64 => DataColumn::Float64(
            values
                .iter()
                .map(|s| s.parse().unwrap_or(f64::NAN))
                .collect(),
        ),
        ColumnType::Int32 | ColumnType::Int64 => {
            DataColumn::Int64(values.iter().map(|s| s.parse().unwrap_or(0)).collect())
        }
        ColumnType::Bool => DataColumn::Bool(
            values
                .iter()
                .map(|s| matches!(s.to_lowercase().as_str(), "true" | "yes"))
                .collect(),
        ),
        ColumnType::String => DataColumn::String(values.to_vec()),
    }
}
