mod errors;
mod job_parameters;
#[cfg(test)]
mod tests;
mod validator;

pub use errors::{ParameterError, ValidationError};
pub use job_parameters::{JobParameter, JobParameters, ParameterType};
pub use validator::{ParametersValidator, RunParameters};

pub const INPUT_FILE: &str = "input.file";
pub const OUTPUT_FILE: &str = "output.file";
pub const DATA_YEAR: &str = "data.year";
pub const DATA_MONTH: &str = "data.month";
pub const SKIP_FILE: &str = "skip.file";
