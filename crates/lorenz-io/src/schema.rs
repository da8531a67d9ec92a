//! Schema and column types for tabular data

use serde::{Deserialize, Serialize};

/// Schema describing the structure of a table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataSchema {
    /// Column descriptors, in table order
    pub columns: Vec<ColumnDescriptor>,

    /// Number of records
    pub num_records: usize,
}

impl DataSchema {
    /// Create a new schema
    pub fn new(columns: Vec<ColumnDescriptor>, num_records: usize) -> Self {
        Self {
            columns,
            num_records,
        }
    }

    /// Get a column by name
    pub fn column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Get column index by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Get column names
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Number of columns
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Names of the columns that can feed a numeric computation
    pub fn numeric_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.dtype.is_numeric())
            .map(|c| c.name.as_str())
            .collect()
    }
}

/// Descriptor for a column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Column name
    pub name: String,

    /// Data type
    pub dtype: ColumnType,
}

impl ColumnDescriptor {
    /// Create a new column descriptor
    pub fn new(name: impl Into<String>, dtype: ColumnType) -> Self {
        Self {
            name: name.into(),
            dtype,
        }
    }
}

/// Column data type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    Float32,
    Float64,
    Int32,
    Int64,
    Bool,
    String,
}

impl ColumnType {
    /// Check if this is a numeric type
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            ColumnType::Float32 | ColumnType::Float64 | ColumnType::Int32 | ColumnType::Int64
        )
    }

    /// Human-readable type name used in error messages
    pub fn name(&self) -> &'static str {
        match self {
            ColumnType::Float32 => "float32",
            ColumnType::Float64 => "float64",
            ColumnType::Int32 => "int32",
            ColumnType::Int64 => "int64",
            ColumnType::Bool => "bool",
            ColumnType::String => "string",
        }
    }
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A column of data
#[derive(Debug, Clone, PartialEq)]
pub enum DataColumn {
    Float32(Vec<f32>),
    Float64(Vec<f64>),
    Int32(Vec<i32>),
    Int64(Vec<i64>),
    Bool(Vec<bool>),
    String(Vec<String>),
}

impl DataColumn {
    /// Get the column type
    pub fn dtype(&self) -> ColumnType {
        match self {
            DataColumn::Float32(_) => ColumnType::Float32,
            DataColumn::Float64(_) => ColumnType::Float64,
            DataColumn::Int32(_) => ColumnType::Int32,
            DataColumn::Int64(_) => ColumnType::Int64,
            DataColumn::Bool(_) => ColumnType::Bool,
            DataColumn::String(_) => ColumnType::String,
        }
    }

    /// Get the number of elements
    pub fn len(&self) -> usize {
        match self {
            DataColumn::Float32(v) => v.len(),
            DataColumn::Float64(v) => v.len(),
            DataColumn::Int32(v) => v.len(),
            DataColumn::Int64(v) => v.len(),
            DataColumn::Bool(v) => v.len(),
            DataColumn::String(v) => v.len(),
        }
    }

    /// Check if the column is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Convert to f64 (for numeric types)
    pub fn to_f64(&self) -> Option<Vec<f64>> {
        match self {
            DataColumn::Float32(v) => Some(v.iter().map(|&x| x as f64).collect()),
            DataColumn::Float64(v) => Some(v.clone()),
            DataColumn::Int32(v) => Some(v.iter().map(|&x| x as f64).collect()),
            DataColumn::Int64(v) => Some(v.iter().map(|&x| x as f64).collect()),
            _ => None,
        }
    }
}

impl From<Vec<f64>> for DataColumn {
    fn from(values: Vec<f64>) -> Self {
        DataColumn::Float64(values)
    }
}

impl From<Vec<f32>> for DataColumn {
    fn from(values: Vec<f32>) -> Self {
        DataColumn::Float32(values)
    }
}

impl From<Vec<i64>> for DataColumn {
    fn from(values: Vec<i64>) -> Self {
        DataColumn::Int64(values)
    }
}

impl From<Vec<i32>> for DataColumn {
    fn from(values: Vec<i32>) -> Self {
        DataColumn::Int32(values)
    }
}

impl From<Vec<bool>> for DataColumn {
    fn from(values: Vec<bool>) -> Self {
        DataColumn::Bool(values)
    }
}

impl From<Vec<String>> for DataColumn {
    fn from(values: Vec<String>) -> Self {
        DataColumn::String(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_column_lookup() {
        let schema = DataSchema::new(
            vec![
                ColumnDescriptor::new("loss", ColumnType::Float64),
                ColumnDescriptor::new("exposure", ColumnType::Int64),
                ColumnDescriptor::new("region", ColumnType::String),
            ],
            100,
        );

        assert_eq!(schema.column_index("loss"), Some(0));
        assert_eq!(schema.column_index("exposure"), Some(1));
        assert_eq!(schema.column_index("premium"), None);
        assert_eq!(schema.numeric_columns(), vec!["loss", "exposure"]);
    }

    #[test]
    fn test_data_column_conversion() {
        let col = DataColumn::Int32(vec![1, 2, 3, 4, 5]);
        let f64_values = col.to_f64().unwrap();
        assert_eq!(f64_values, vec![1.0, 2.0, 3.0, 4.0, 5.0]);

        let col = DataColumn::from(vec!["a".to_string()]);
        assert!(col.to_f64().is_none());
    }

    #[test]
    fn test_column_type_properties() {
        assert!(ColumnType::Float64.is_numeric());
        assert!(ColumnType::Int32.is_numeric());
        assert!(!ColumnType::String.is_numeric());
        assert!(!ColumnType::Bool.is_numeric());
        assert_eq!(ColumnType::Int64.to_string(), "int64");
    }
}
