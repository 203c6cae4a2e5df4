use std::path::PathBuf;

use crate::parameters::{JobParameter, JobParameters, ValidationError, DATA_MONTH, DATA_YEAR, INPUT_FILE, OUTPUT_FILE, SKIP_FILE};

/// Parameters of a run that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct RunParameters {
    pub input_file: PathBuf,
    pub output_file: PathBuf,
    pub data_year: i64,
    pub data_month: i64,
    pub skip_file: Option<PathBuf>
}

/// Gate in front of every run. Pure, performs no I/O.
pub struct ParametersValidator;

impl ParametersValidator {
    /// Checks the parameters in a fixed order and stops at the first failure:
    /// input file, output file, year, month, and finally the optional skip file type.
    ///
    /// # Errors
    /// Returns the `ValidationError` bound to the first offending key.
    pub fn validate(parameters: &JobParameters) -> Result<RunParameters, ValidationError> {
        let input_file = text(parameters.get_string(INPUT_FILE)?)
            .ok_or(ValidationError::InputFileMissing)?;

        let output_file = text(parameters.get_string(OUTPUT_FILE)?)
            .ok_or(ValidationError::OutputFileMissing)?;

        let data_year = parameters.get(DATA_YEAR)
            .and_then(JobParameter::as_integer)
            .ok_or(ValidationError::YearMissing)?;

        let data_month = parameters.get(DATA_MONTH)
            .and_then(JobParameter::as_integer)
            .ok_or(ValidationError::MonthMissing)?;

        let skip_file = text(parameters.get_string(SKIP_FILE)?);

        Ok(RunParameters {
            input_file: PathBuf::from(input_file),
            output_file: PathBuf::from(output_file),
            data_year,
            data_month,
            skip_file: skip_file.map(PathBuf::from)
        })
    }
}

fn text(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.trim().is_empty())
}
