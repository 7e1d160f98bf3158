//! CSV team import parsing

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::domain::team::{
    require_field, validate_csv_filename, NewTeam, TeamValidationError, DESCRIPTION_COLUMN,
    NAME_COLUMN,
};

const UTF8_BOM: char = '\u{feff}';

/// Parse an uploaded CSV file into teams to insert
///
/// The file name is checked before the body is decoded. Every data row must
/// carry a non-blank name and description; the first bad row rejects the
/// whole file. Columns other than `name` and `description` are ignored and
/// blank lines, including whitespace-only ones, are skipped.
pub fn parse_team_rows(bytes: &[u8], filename: &str) -> Result<Vec<NewTeam>, TeamValidationError> {
    validate_csv_filename(filename)?;

    let text = std::str::from_utf8(bytes)
        .map_err(|e| TeamValidationError::InvalidEncoding(e.to_string()))?;
    let text = text.strip_prefix(UTF8_BOM).unwrap_or(text);

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(text.as_bytes());

    let headers = reader.headers().map_err(malformed)?.clone();
    let name_index = column_index(&headers, NAME_COLUMN)?;
    let description_index = column_index(&headers, DESCRIPTION_COLUMN)?;

    let mut teams = Vec::new();

    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(malformed)?;
        let row = index + 1;

        if is_blank(&record) {
            continue;
        }

        let name = require_field(record.get(name_index), row, NAME_COLUMN)?;
        let description = require_field(record.get(description_index), row, DESCRIPTION_COLUMN)?;

        teams.push(NewTeam::new(name, description));
    }

    Ok(teams)
}

fn column_index(headers: &StringRecord, column: &'static str) -> Result<usize, TeamValidationError> {
    headers
        .iter()
        .position(|header| header == column)
        .ok_or(TeamValidationError::MissingColumn(column))
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|field| field.trim().is_empty())
}

fn malformed(err: csv::Error) -> TeamValidationError {
    TeamValidationError::MalformedCsv(err.to_string())
}
