use crate::domain::model::{ContactTable, Record};
use crate::utils::error::{ConvertError, Result};
use csv::{Terminator, WriterBuilder};

pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Google Contacts import layout, in output order.
pub const GOOGLE_COLUMNS: [&str; 38] = [
    "First Name",
    "Middle Name",
    "Last Name",
    "Phonetic First Name",
    "Phonetic Middle Name",
    "Phonetic Last Name",
    "Name Prefix",
    "Name Suffix",
    "Nickname",
    "File As",
    "Organization Name",
    "Organization Title",
    "Organization Department",
    "Birthday",
    "Notes",
    "Photo",
    "Labels",
    "E-mail 1 - Label",
    "E-mail 1 - Value",
    "E-mail 2 - Label",
    "E-mail 2 - Value",
    "Phone 1 - Label",
    "Phone 1 - Value",
    "Phone 2 - Label",
    "Phone 2 - Value",
    "Phone 3 - Label",
    "Phone 3 - Value",
    "Address 1 - Label",
    "Address 1 - Formatted",
    "Address 1 - Street",
    "Address 1 - City",
    "Address 1 - PO Box",
    "Address 1 - Region",
    "Address 1 - Postal Code",
    "Address 1 - Country",
    "Address 1 - Extended Address",
    "Website 1 - Label",
    "Website 1 - Value",
];

/// Re-keys records onto exactly [`GOOGLE_COLUMNS`]: absent columns become
/// empty strings, anything else is dropped.
pub fn finalize(records: Vec<Record>) -> ContactTable {
    let records = records
        .into_iter()
        .map(|record| {
            GOOGLE_COLUMNS
                .iter()
                .map(|&column| (column, record.get(column).to_string()))
                .collect::<Record>()
        })
        .collect();

    ContactTable {
        columns: GOOGLE_COLUMNS.iter().map(|c| c.to_string()).collect(),
        records,
    }
}

/// Comma-delimited UTF-8 with a byte-order mark, one header row.
pub fn to_csv_bytes(table: &ContactTable) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .delimiter(b',')
        .terminator(Terminator::Any(b'\n'))
        .from_writer(UTF8_BOM.to_vec());

    writer.write_record(&table.columns)?;
    for index in 0..table.len() {
        if let Some(row) = table.row(index) {
            writer.write_record(&row)?;
        }
    }

    writer.into_inner().map_err(|e| ConvertError::ProcessingError {
        message: format!("failed to flush CSV output: {}", e.error()),
    })
}
