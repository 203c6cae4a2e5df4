use super::*;

use anyhow::Result;
use std::path::PathBuf;

fn complete_parameters() -> JobParameters {
    JobParameters::new()
        .with_string(INPUT_FILE, "input/billing-2023-01.csv")
        .with_string(OUTPUT_FILE, "staging/billing-report-2023-01.csv")
        .with_integer(DATA_YEAR, 2023)
        .with_integer(DATA_MONTH, 1)
}

fn without(parameters: &JobParameters, key: &str) -> JobParameters {
    let mut result = JobParameters::new();

    for candidate in [INPUT_FILE, OUTPUT_FILE, DATA_YEAR, DATA_MONTH, SKIP_FILE] {
        if candidate == key {
            continue;
        }

        if let Some(parameter) = parameters.get(candidate) {
            result = result.with(candidate, parameter.clone());
        }
    }

    result
}

#[test]
fn test_complete_parameters_pass_validation() -> Result<()> {
    let validated = ParametersValidator::validate(&complete_parameters())?;

    assert_eq!(validated.input_file, PathBuf::from("input/billing-2023-01.csv"));
    assert_eq!(validated.output_file, PathBuf::from("staging/billing-report-2023-01.csv"));
    assert_eq!(validated.data_year, 2023);
    assert_eq!(validated.data_month, 1);
    assert!(validated.skip_file.is_none());

    Ok(())
}

#[test]
fn test_each_missing_key_fails_with_its_own_message() {
    let test_cases = vec![
        (INPUT_FILE, "Input File is missing or is incorrectly formatted. Requires string."),
        (OUTPUT_FILE, "Output File is missing or is incorrectly formatted. Requires string."),
        (DATA_YEAR, "Year is missing or is incorrectly formatted. Requires integer."),
        (DATA_MONTH, "Month is missing or is incorrectly formatted. Requires integer."),
    ];

    for (key, expected_message) in test_cases {
        let parameters = without(&complete_parameters(), key);
        let error = ParametersValidator::validate(&parameters).unwrap_err();

        assert_eq!(error.to_string(), expected_message, "missing key {key}");
    }
}

#[test]
fn test_blank_input_file_is_treated_as_missing() {
    let parameters = complete_parameters().with_string(INPUT_FILE, "   ");

    assert_eq!(ParametersValidator::validate(&parameters), Err(ValidationError::InputFileMissing));
}

#[test]
fn test_validation_short_circuits_on_first_failure() {
    let parameters = JobParameters::new().with_integer(DATA_MONTH, 1);

    assert_eq!(ParametersValidator::validate(&parameters), Err(ValidationError::InputFileMissing));
}

#[test]
fn test_input_file_of_wrong_type_is_a_type_mismatch() {
    let parameters = complete_parameters().with_integer(INPUT_FILE, 42);
    let error = ParametersValidator::validate(&parameters).unwrap_err();

    assert_eq!(error, ValidationError::type_mismatch(INPUT_FILE, ParameterType::String));
    assert_eq!(error.to_string(), "Key input.file is not of type String");
}

#[test]
fn test_year_declared_as_string_is_reported_as_missing_year() {
    let parameters = complete_parameters().with_string(DATA_YEAR, "2023");

    assert_eq!(ParametersValidator::validate(&parameters), Err(ValidationError::YearMissing));
}

#[test]
fn test_month_accepts_long_values() -> Result<()> {
    let parameters = complete_parameters().with_long(DATA_MONTH, 12);

    assert_eq!(ParametersValidator::validate(&parameters)?.data_month, 12);

    Ok(())
}

#[test]
fn test_month_declared_as_double_is_rejected() {
    let parameters = complete_parameters().with_double(DATA_MONTH, 1.0);

    assert_eq!(ParametersValidator::validate(&parameters), Err(ValidationError::MonthMissing));
}

#[test]
fn test_optional_skip_file_is_read_when_present() -> Result<()> {
    let parameters = complete_parameters().with_string(SKIP_FILE, "staging/skipped.psv");

    assert_eq!(ParametersValidator::validate(&parameters)?.skip_file, Some(PathBuf::from("staging/skipped.psv")));

    let blank = complete_parameters().with_string(SKIP_FILE, "");

    assert!(ParametersValidator::validate(&blank)?.skip_file.is_none());

    Ok(())
}

#[test]
fn test_skip_file_of_wrong_type_is_a_type_mismatch() {
    let parameters = complete_parameters().with_long(SKIP_FILE, 7);

    assert_eq!(
        ParametersValidator::validate(&parameters),
        Err(ValidationError::type_mismatch(SKIP_FILE, ParameterType::String))
    );
}

#[test]
fn test_parameters_parse_from_command_line_arguments() -> Result<()> {
    let parameters = JobParameters::from_args([
        "input.file=input/billing-2023-01.csv",
        "output.file=staging/report.csv,String",
        "data.year=2023,Integer",
        "data.month=1,long",
    ])?;

    assert_eq!(parameters.len(), 4);
    assert_eq!(parameters.get_string(OUTPUT_FILE)?, Some("staging/report.csv"));
    assert_eq!(parameters.get(DATA_YEAR), Some(&JobParameter::Integer(2023)));
    assert_eq!(parameters.get(DATA_MONTH), Some(&JobParameter::Long(1)));

    Ok(())
}

#[test]
fn test_untyped_argument_with_comma_stays_a_string() -> Result<()> {
    let parameters = JobParameters::from_args(["input.file=input/a,b.csv"])?;

    assert_eq!(parameters.get_string(INPUT_FILE)?, Some("input/a,b.csv"));

    Ok(())
}

#[test]
fn test_malformed_arguments_are_rejected_at_construction() {
    assert!(matches!(
        JobParameters::from_args(["input.file"]),
        Err(ParameterError::Malformed { .. })
    ));
    assert!(matches!(
        JobParameters::from_args(["=value"]),
        Err(ParameterError::Malformed { .. })
    ));
    assert!(matches!(
        JobParameters::from_args(["data.year=twenty,Integer"]),
        Err(ParameterError::InvalidValue { expected: ParameterType::Integer, .. })
    ));
}

#[test]
fn test_unrecognised_type_suffix_is_part_of_the_string() -> Result<()> {
    let parameters = JobParameters::from_args([
        "input.file=input/billing.csv",
        "output.file=out,Final",
        "data.year=2023,Boolean",
        "data.month=1,Integer",
    ])?;

    assert_eq!(parameters.get_string(OUTPUT_FILE)?, Some("out,Final"));
    assert_eq!(parameters.get_string(DATA_YEAR)?, Some("2023,Boolean"));
    assert_eq!(ParametersValidator::validate(&parameters), Err(ValidationError::YearMissing));

    Ok(())
}
