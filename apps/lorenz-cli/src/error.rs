//! Error types for the lorenz CLI

use std::path::PathBuf;

use lorenz_io::IoError;
use lorenz_stats::GiniError;
use thiserror::Error;

use crate::config::ConfigError;

/// Main error type for CLI runs
#[derive(Debug, Error)]
pub enum CliError {
    /// Input could not be loaded
    #[error("Failed to load input: {0}")]
    Input(#[from] IoError),

    /// Computation failed
    #[error("Gini computation failed: {0}")]
    Gini(#[from] GiniError),

    /// Bad configuration
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// No outcome column from flags or config
    #[error("No outcome column given (use --outcome or [columns] outcome in the config)")]
    MissingOutcome,

    /// Output file could not be created
    #[error("Cannot write {}: {source}", path.display())]
    Output {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Rendering failed
    #[error("Rendering failed: {0}")]
    Render(String),

    /// I/O errors while writing output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV encoding errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON encoding errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, CliError>;
