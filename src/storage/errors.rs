use std::path::PathBuf;

use rusqlite::ErrorCode;
use thiserror::Error;

/// Failure while opening a store or file.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("Unable to open [{path}]: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error
    },
    #[error("Unable to write [{path}]: {source}")]
    Csv {
        path: PathBuf,
        source: csv::Error
    }
}

impl StorageError {
    pub fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io { path: path.to_path_buf(), source }
    }
}

/// Failure while committing a chunk.
///
/// `Transient` failures are expected to succeed when retried with the same chunk.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SinkError {
    #[error("Transient sink failure: {0}")]
    Transient(String),
    #[error("Sink failure: {0}")]
    Fatal(String)
}

impl SinkError {
    pub fn is_transient(&self) -> bool {
        matches!(self, SinkError::Transient(_))
    }
}

impl From<rusqlite::Error> for SinkError {
    fn from(error: rusqlite::Error) -> Self {
        match error.sqlite_error_code() {
            Some(ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked) => SinkError::Transient(error.to_string()),
            _ => SinkError::Fatal(error.to_string())
        }
    }
}

impl From<std::io::Error> for SinkError {
    fn from(error: std::io::Error) -> Self {
        use std::io::ErrorKind;

        match error.kind() {
            ErrorKind::Interrupted | ErrorKind::WouldBlock | ErrorKind::TimedOut => SinkError::Transient(error.to_string()),
            _ => SinkError::Fatal(error.to_string())
        }
    }
}

impl From<csv::Error> for SinkError {
    fn from(error: csv::Error) -> Self {
        match error.into_kind() {
            csv::ErrorKind::Io(error) => SinkError::from(error),
            other => SinkError::Fatal(format!("{other:?}"))
        }
    }
}
