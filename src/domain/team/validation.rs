//! Team import validation

use thiserror::Error;

use crate::domain::DomainError;

/// Column every imported row must provide a name in
pub const NAME_COLUMN: &str = "name";

/// Column every imported row must provide a description in
pub const DESCRIPTION_COLUMN: &str = "description";

const CSV_EXTENSION: &str = ".csv";

/// Errors that reject a team import
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TeamValidationError {
    #[error("File '{0}' is not a .csv file")]
    InvalidExtension(String),

    #[error("File is not valid UTF-8: {0}")]
    InvalidEncoding(String),

    #[error("Failed to parse CSV: {0}")]
    MalformedCsv(String),

    #[error("CSV header is missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("Row {row} is missing required field '{column}'")]
    MissingField { row: usize, column: &'static str },
}

impl From<TeamValidationError> for DomainError {
    fn from(err: TeamValidationError) -> Self {
        DomainError::bad_input(err.to_string())
    }
}

/// Validate that an uploaded file name carries the CSV extension
pub fn validate_csv_filename(filename: &str) -> Result<(), TeamValidationError> {
    if !filename.ends_with(CSV_EXTENSION) {
        return Err(TeamValidationError::InvalidExtension(filename.to_string()));
    }

    Ok(())
}

/// Validate a required field of an imported row
///
/// Rows are numbered from 1, counting data rows only.
pub fn require_field<'a>(
    value: Option<&'a str>,
    row: usize,
    column: &'static str,
) -> Result<&'a str, TeamValidationError> {
    match value.map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(TeamValidationError::MissingField { row, column }),
    }
}
