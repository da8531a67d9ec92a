//! Error types for lorenz-stats

use lorenz_io::IoError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which normalized column a degenerate total was found in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnRole {
    Outcome,
    Weight,
}

impl std::fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnRole::Outcome => f.write_str("outcome"),
            ColumnRole::Weight => f.write_str("weight"),
        }
    }
}

/// Errors from the Gini computation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GiniError {
    /// The dataset (or one of its columns) cannot be used as numeric table data
    #[error("Invalid input: {0}")]
    InvalidInputType(String),

    /// A named column does not exist
    #[error("Column not found: {0}")]
    UnknownColumn(String),

    /// Outcome or weight sums to zero, so shares are undefined
    #[error("{role} column '{column}' sums to zero")]
    DegenerateTotal { column: String, role: ColumnRole },

    /// The dataset has no rows
    #[error("Dataset has no rows")]
    EmptyDataset,
}

impl From<IoError> for GiniError {
    fn from(err: IoError) -> Self {
        match err {
            IoError::ColumnNotFound(name) => GiniError::UnknownColumn(name),
            other => GiniError::InvalidInputType(other.to_string()),
        }
    }
}

/// Result type alias for Gini computations
pub type StatsResult<T> = Result<T, GiniError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let err: GiniError = IoError::ColumnNotFound("premium".to_string()).into();
        assert_eq!(err, GiniError::UnknownColumn("premium".to_string()));

        let err: GiniError = IoError::TypeMismatch {
            column: "region".to_string(),
            expected: "numeric".to_string(),
            actual: "string".to_string(),
        }
        .into();
        assert!(matches!(err, GiniError::InvalidInputType(msg) if msg.contains("region")));
    }

    #[test]
    fn test_degenerate_total_display() {
        let err = GiniError::DegenerateTotal {
            column: "exposure".to_string(),
            role: ColumnRole::Weight,
        };
        assert_eq!(err.to_string(), "weight column 'exposure' sums to zero");
    }
}
