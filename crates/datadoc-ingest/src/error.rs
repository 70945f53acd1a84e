use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse dataset {path}: {message}")]
    Csv { path: PathBuf, message: String },

    #[error("dataset {path} has no header row")]
    Empty { path: PathBuf },

    #[error("dataset {path} has duplicate column '{column}'")]
    DuplicateColumn { path: PathBuf, column: String },

    #[error("cannot derive a document path from {path}")]
    InvalidPath { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, IngestError>;
