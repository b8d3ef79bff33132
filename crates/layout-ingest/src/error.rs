//! Error types for layout ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading tables from disk.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Input path does not exist.
    #[error("input not found: {path}")]
    NotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV reader rejected the file.
    #[error("failed to parse CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Writing a CSV file failed.
    #[error("failed to write CSV {path}: {source}")]
    CsvWrite {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Directory holds no CSV files.
    #[error("no CSV files found in {path}")]
    NoTables { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, IngestError>;
