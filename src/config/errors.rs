use std::path::PathBuf;

use thiserror::Error;

use crate::processor::Dimension;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unable to read configuration [{path}]: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error
    },
    #[error("Unable to parse configuration [{path}]: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error
    },
    #[error("Price for {dimension:?} must be a non-negative number")]
    NegativePrice {
        dimension: Dimension
    },
    #[error("Spending threshold must be a non-negative number")]
    InvalidThreshold,
    #[error("Chunk size must be greater than zero")]
    ZeroChunkSize
}
