//! In-memory columnar table

use crate::schema::{ColumnType, DataColumn};
use crate::table::{IoError, IoResult, TabularData};

/// An owned, column-oriented table
///
/// Columns keep their insertion order and must all have the same length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataFrame {
    columns: Vec<(String, DataColumn)>,
    num_rows: usize,
}

impl DataFrame {
    /// Create an empty frame
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a frame from `f64` columns
    pub fn from_f64_columns<I, S>(columns: I) -> IoResult<Self>
    where
        I: IntoIterator<Item = (S, Vec<f64>)>,
        S: Into<String>,
    {
        let mut frame = Self::new();
        for (name, values) in columns {
            frame.add_column(name, DataColumn::Float64(values))?;
        }
        Ok(frame)
    }

    /// Add a column, builder style
    pub fn with_column(
        mut self,
        name: impl Into<String>,
        data: impl Into<DataColumn>,
    ) -> IoResult<Self> {
        self.add_column(name, data.into())?;
        Ok(self)
    }

    /// Add or replace a column
    ///
    /// The first column fixes the row count; later columns must match it.
    pub fn add_column(&mut self, name: impl Into<String>, data: DataColumn) -> IoResult<()> {
        let name = name.into();
        if !self.columns.is_empty() && data.len() != self.num_rows {
            return Err(IoError::LengthMismatch {
                column: name,
                expected: self.num_rows,
                actual: data.len(),
            });
        }
        if self.columns.is_empty() {
            self.num_rows = data.len();
        }

        match self.columns.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = data,
            None => self.columns.push((name, data)),
        }
        Ok(())
    }

    /// Get a column by name
    pub fn column(&self, name: &str) -> Option<&DataColumn> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, data)| data)
    }

    /// Number of columns
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }
}

impl TabularData for DataFrame {
    fn num_rows(&self) -> usize {
        self.num_rows
    }

    fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(n, _)| n.as_str()).collect()
    }

    fn column_type(&self, name: &str) -> Option<ColumnType> {
        self.column(name).map(DataColumn::dtype)
    }

    fn column_f64(&self, name: &str) -> IoResult<Vec<f64>> {
        let data = self
            .column(name)
            .ok_or_else(|| IoError::ColumnNotFound(name.to_string()))?;
        data.to_f64().ok_or_else(|| IoError::TypeMismatch {
            column: name.to_string(),
            expected: "numeric".to_string(),
            actual: data.dtype().to_string(),
        })
    }

    fn backend_name(&self) -> &'static str {
        "DataFrame"
    }
}
