//! Error handling for the claims dashboard.

pub mod util;

use std::io;
use std::path::PathBuf;

use arrow::datatypes::DataType;
use arrow::error::ArrowError;

/// Errors raised while loading the claims dataset or preparing dashboard data
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// Error opening or reading the source artifact
    #[error("IO error: {message} (path: {})", .path.display())]
    Io {
        message: String,
        path: PathBuf,
        #[source]
        source: Option<io::Error>,
    },

    /// Error decoding CSV data into Arrow arrays
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// A required column is absent from the source file
    #[error("Column '{column}' not found")]
    ColumnNotFound { column: String },

    /// A column could not be converted to the type the loader needs
    #[error("Column '{column}' has type {actual:?}, expected {expected:?}")]
    TypeMismatch {
        column: String,
        expected: DataType,
        actual: DataType,
    },

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),
}

impl DashboardError {
    /// IO error without an underlying `io::Error`
    pub fn io(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            message: message.into(),
            path: path.into(),
            source: None,
        }
    }

    /// IO error wrapping the `io::Error` that caused it
    pub fn io_with_source(
        message: impl Into<String>,
        path: impl Into<PathBuf>,
        source: io::Error,
    ) -> Self {
        Self::Io {
            message: message.into(),
            path: path.into(),
            source: Some(source),
        }
    }
}

/// Result type for dashboard operations
pub type Result<T> = std::result::Result<T, DashboardError>;
