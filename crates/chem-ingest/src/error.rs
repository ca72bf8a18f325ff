//! Error types for ingestion.

use std::path::PathBuf;

/// Errors raised while locating or reading input files.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to open workbook {path}: {source}")]
    Workbook {
        path: PathBuf,
        #[source]
        source: calamine::XlsxError,
    },

    #[error("workbook {path} has no worksheet")]
    NoWorksheet { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, IngestError>;
