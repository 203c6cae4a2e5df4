use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, info};

use crate::config::ConfigError;
use crate::processor::PricingTable;

/// Overrides `database` when set.
pub const DATABASE_ENV: &str = "BILLING_DATABASE";

/// Process-wide settings for billing runs. Every field has a default so a
/// configuration file only needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JobSettings {
    pub pricing: PricingTable,
    pub spending_threshold: f64,
    /// Number of read records committed together.
    pub chunk_size: usize,
    /// Additional commit attempts after the first transient failure.
    pub max_retries: u32,
    pub retry_backoff_ms: u64,
    /// Malformed lines tolerated per run when a skip file is configured.
    pub skip_limit: u64,
    /// Upper bound a commit waits on a locked database before failing transiently.
    pub commit_timeout_ms: u64,
    pub database: PathBuf,
    /// Directory the input file is copied into before ingesting.
    pub staging_directory: Option<PathBuf>,
    pub reader_has_header: bool
}

impl Default for JobSettings {
    fn default() -> Self {
        Self {
            pricing: PricingTable::default(),
            spending_threshold: 150.0,
            chunk_size: 100,
            max_retries: 3,
            retry_backoff_ms: 250,
            skip_limit: 10,
            commit_timeout_ms: 5_000,
            database: PathBuf::from("billing.db"),
            staging_directory: None,
            reader_has_header: false
        }
    }
}

impl JobSettings {
    /// Loads settings from an optional YAML file, applies environment overrides and validates them.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut settings = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                debug!("No configuration file given, using defaults");
                Self::default()
            }
        };

        if let Ok(database) = std::env::var(DATABASE_ENV) {
            info!("Database path overridden by {DATABASE_ENV}");
            settings.database = PathBuf::from(database);
        }

        settings.validate()?;

        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        info!("Loading configuration from: {}", path.display());

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source
        })?;

        Self::from_yaml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source
        })
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default())
        }

        serde_yaml::from_str(content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(dimension) = self.pricing.invalid_dimension() {
            return Err(ConfigError::NegativePrice { dimension })
        }

        if self.spending_threshold.is_nan() || self.spending_threshold < 0.0 {
            return Err(ConfigError::InvalidThreshold)
        }

        if self.chunk_size == 0 {
            return Err(ConfigError::ZeroChunkSize)
        }

        Ok(())
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }

    pub fn commit_timeout(&self) -> Duration {
        Duration::from_millis(self.commit_timeout_ms)
    }
}
