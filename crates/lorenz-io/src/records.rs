//! Row-oriented numeric table
//!
//! Useful when records arrive one at a time (e.g. from a query cursor)
//! rather than as whole columns.

use crate::schema::ColumnType;
use crate::table::{IoError, IoResult, TabularData};

/// A table stored as rows of `f64` values under a fixed header
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordTable {
    header: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl RecordTable {
    /// Create an empty table with the given column names
    pub fn new<I, S>(header: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            header: header.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Create a table from a header and a set of rows
    pub fn from_rows<I, S>(header: I, rows: Vec<Vec<f64>>) -> IoResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self::new(header);
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    /// Append a record
    pub fn push_row(&mut self, row: Vec<f64>) -> IoResult<()> {
        if row.len() != self.header.len() {
            return Err(IoError::LengthMismatch {
                column: format!("row {}", self.rows.len()),
                expected: self.header.len(),
                actual: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Get a single record
    pub fn row(&self, index: usize) -> Option<&[f64]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    fn column_index(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h == name)
    }
}

impl TabularData for RecordTable {
    fn num_rows(&self) -> usize {
        self.rows.len()
    }

    fn column_names(&self) -> Vec<&str> {
        self.header.iter().map(String::as_str).collect()
    }

    fn column_type(&self, name: &str) -> Option<ColumnType> {
        self.column_index(name).map(|_| ColumnType::Float64)
    }

    fn column_f64(&self, name: &str) -> IoResult<Vec<f64>> {
        let index = self
            .column_index(name)
            .ok_or_else(|| IoError::ColumnNotFound(name.to_string()))?;
        Ok(self.rows.iter().map(|row| row[index]).collect())
    }

    fn backend_name(&self) -> &'static str {
        "RecordTable"
    }
}
