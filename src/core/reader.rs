use crate::domain::model::RawTable;
use crate::utils::error::{ConvertError, Result};
use csv::ReaderBuilder;

/// Parses decoded text into a [`RawTable`]; the first record is the header.
///
/// Short rows are padded with empty cells. A row wider than the header is a
/// parse error, as is any structural error from the reader.
pub fn parse_table(text: &str, delimiter: u8) -> Result<RawTable> {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| ConvertError::ParseError {
            message: format!("failed to read header row: {}", e),
        })?
        .iter()
        .map(str::to_string)
        .collect();

    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(ConvertError::EmptyInput);
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| ConvertError::ParseError {
            message: format!("failed to parse row {}: {}", rows.len() + 1, e),
        })?;

        if record.len() > headers.len() {
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            return Err(ConvertError::ParseError {
                message: format!(
                    "line {}: expected {} fields, found {}",
                    line,
                    headers.len(),
                    record.len()
                ),
            });
        }

        let mut row: Vec<String> = record.iter().map(str::to_string).collect();
        row.resize(headers.len(), String::new());
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(ConvertError::EmptyInput);
    }

    tracing::debug!(
        "Parsed {} rows x {} columns with delimiter {:?}",
        rows.len(),
        headers.len(),
        delimiter as char
    );
    Ok(RawTable::new(headers, rows))
}
