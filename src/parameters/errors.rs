use thiserror::Error;

use crate::parameters::ParameterType;

/// Raised by the validator before a run is allowed to touch any file or table.
///
/// The messages are stable and are matched verbatim by automated checks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Input File is missing or is incorrectly formatted. Requires string.")]
    InputFileMissing,
    #[error("Output File is missing or is incorrectly formatted. Requires string.")]
    OutputFileMissing,
    #[error("Year is missing or is incorrectly formatted. Requires integer.")]
    YearMissing,
    #[error("Month is missing or is incorrectly formatted. Requires integer.")]
    MonthMissing,
    #[error("Key {key} is not of type {expected}")]
    TypeMismatch {
        key: String,
        expected: ParameterType
    }
}

impl ValidationError {
    pub fn type_mismatch(key: &str, expected: ParameterType) -> Self {
        Self::TypeMismatch { key: key.to_string(), expected }
    }
}

/// Raised while turning `key=value[,Type]` arguments into job parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParameterError {
    #[error("Parameter [{argument}] is not of the form key=value[,Type]")]
    Malformed {
        argument: String
    },
    #[error("Parameter [{key}] value [{value}] cannot be read as {expected}")]
    InvalidValue {
        key: String,
        value: String,
        expected: ParameterType
    }
}
