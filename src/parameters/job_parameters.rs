use std::collections::BTreeMap;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::parameters::{ParameterError, ValidationError};

/// Declared type of a job parameter, fixed when the parameter is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterType {
    String,
    Integer,
    Long,
    Double
}

impl Display for ParameterType {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParameterType::String => "String",
            ParameterType::Integer => "Integer",
            ParameterType::Long => "Long",
            ParameterType::Double => "Double"
        };

        formatter.write_str(name)
    }
}

impl FromStr for ParameterType {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "string" => Ok(ParameterType::String),
            "integer" | "int" => Ok(ParameterType::Integer),
            "long" => Ok(ParameterType::Long),
            "double" | "float" => Ok(ParameterType::Double),
            _ => Err(())
        }
    }
}

/// A single typed job parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum JobParameter {
    String(String),
    Integer(i32),
    Long(i64),
    Double(f64)
}

impl JobParameter {
    /// Returns the value when the parameter was declared with an integral type.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            JobParameter::Integer(value) => Some(i64::from(*value)),
            JobParameter::Long(value) => Some(*value),
            _ => None
        }
    }

    fn parse(key: &str, value: &str, parameter_type: ParameterType) -> Result<Self, ParameterError> {
        let invalid = || ParameterError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            expected: parameter_type
        };

        match parameter_type {
            ParameterType::String => Ok(JobParameter::String(value.to_string())),
            ParameterType::Integer => value.trim().parse().map(JobParameter::Integer).map_err(|_| invalid()),
            ParameterType::Long => value.trim().parse().map(JobParameter::Long).map_err(|_| invalid()),
            ParameterType::Double => value.trim().parse().map(JobParameter::Double).map_err(|_| invalid())
        }
    }
}

/// Immutable set of named, typed parameters handed to a single run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobParameters {
    parameters: BTreeMap<String, JobParameter>
}

impl JobParameters {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn with_string(self, key: &str, value: &str) -> Self {
        self.with(key, JobParameter::String(value.to_string()))
    }

    #[cfg(test)]
    pub fn with_integer(self, key: &str, value: i32) -> Self {
        self.with(key, JobParameter::Integer(value))
    }

    #[cfg(test)]
    pub fn with_long(self, key: &str, value: i64) -> Self {
        self.with(key, JobParameter::Long(value))
    }

    #[cfg(test)]
    pub fn with_double(self, key: &str, value: f64) -> Self {
        self.with(key, JobParameter::Double(value))
    }

    pub fn with(mut self, key: &str, parameter: JobParameter) -> Self {
        self.parameters.insert(key.to_string(), parameter);
        self
    }

    /// Builds parameters from command line arguments of the form `key=value[,Type]`.
    ///
    /// Without a type suffix the value is a `String`. A trailing `,suffix` that does not
    /// name one of `String`, `Integer`, `Long` or `Double` is kept as part of a string value,
    /// so `output.file=out,Final` is the string `out,Final`.
    pub fn from_args<I, S>(arguments: I) -> Result<Self, ParameterError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>
    {
        let mut parameters = JobParameters::new();

        for argument in arguments {
            let argument = argument.as_ref();
            let Some((key, raw_value)) = argument.split_once('=') else {
                return Err(ParameterError::Malformed { argument: argument.to_string() })
            };

            let key = key.trim();
            if key.is_empty() {
                return Err(ParameterError::Malformed { argument: argument.to_string() })
            }

            let (value, parameter_type) = match raw_value.rsplit_once(',') {
                Some((value, suffix)) => match suffix.parse::<ParameterType>() {
                    Ok(parameter_type) => (value, parameter_type),
                    Err(_) => (raw_value, ParameterType::String)
                },
                None => (raw_value, ParameterType::String)
            };

            let parameter = JobParameter::parse(key, value, parameter_type)?;
            parameters = parameters.with(key, parameter);
        }

        Ok(parameters)
    }

    pub fn get(&self, key: &str) -> Option<&JobParameter> {
        self.parameters.get(key)
    }

    /// Reads a string parameter; a value declared with another type is a type mismatch.
    pub fn get_string(&self, key: &str) -> Result<Option<&str>, ValidationError> {
        match self.parameters.get(key) {
            None => Ok(None),
            Some(JobParameter::String(value)) => Ok(Some(value.as_str())),
            Some(_) => Err(ValidationError::type_mismatch(key, ParameterType::String))
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }
}
