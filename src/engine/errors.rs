use std::path::PathBuf;

use thiserror::Error;

use crate::storage::{SinkError, StorageError};

/// Cause of a run ending in the failed state. Chunks committed before the
/// failure stay persisted.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Unable to stage input [{path}]: {source}")]
    Preparation {
        path: PathBuf,
        source: std::io::Error
    },
    #[error("Unable to open run resources: {0}")]
    Open(StorageError),
    #[error("Unable to read input at line {line}: {source}")]
    Read {
        line: u64,
        source: std::io::Error
    },
    #[error("Malformed record at line {line}: {reason}")]
    Parse {
        line: u64,
        reason: String
    },
    #[error("Skip limit of {limit} exceeded at line {line}: {reason}")]
    SkipLimitExceeded {
        limit: u64,
        line: u64,
        reason: String
    },
    #[error("Unable to record skipped line: {0}")]
    SkipLedger(StorageError),
    #[error("Chunk commit failed after {attempts} attempt(s): {source}")]
    CommitFailed {
        attempts: u32,
        source: SinkError
    },
    #[error("Run cancelled")]
    Cancelled
}
