use crate::domain::model::Record;
use crate::utils::error::FieldDerivationWarning;
use chrono::{Datelike, NaiveDate};

pub const BIRTHDAY: &str = "Birthday";
pub const FORMATTED_ADDRESS: &str = "Address 1 - Formatted";

/// Returns a copy of `record` with `Birthday` and `Address 1 - Formatted` set.
///
/// A birthday that cannot be derived becomes an empty string; the problem is
/// logged and never leaves this row.
pub fn format_fields(record: &Record) -> Record {
    let birthday = derive_birthday(record).unwrap_or_else(|warning| {
        if !matches!(warning, FieldDerivationWarning::MissingBirthComponent { .. }) {
            tracing::debug!("Birthday left empty: {}", warning);
        }
        String::new()
    });

    record
        .clone()
        .with(BIRTHDAY, birthday)
        .with(FORMATTED_ADDRESS, format_address(record))
}

/// `MM/DD/YYYY` from the three birth components, all of which must be present
/// and form a real calendar date. Month and day are zero-padded; the year is
/// written as given, so a two-digit `90` stays `90`.
pub fn derive_birthday(record: &Record) -> Result<String, FieldDerivationWarning> {
    let year = parse_component(record, "Birth Year")?;
    let month = parse_component(record, "Birth Month")?;
    let day = parse_component(record, "Birth Day")?;

    let impossible = FieldDerivationWarning::ImpossibleDate { year, month, day };
    if !(1..=9999).contains(&year) {
        return Err(impossible);
    }
    let date = match (i32::try_from(year), u32::try_from(month), u32::try_from(day)) {
        (Ok(y), Ok(m), Ok(d)) => NaiveDate::from_ymd_opt(y, m, d),
        _ => None,
    }
    .ok_or(impossible)?;

    Ok(format!("{:02}/{:02}/{}", date.month(), date.day(), date.year()))
}

fn parse_component(record: &Record, field: &'static str) -> Result<i64, FieldDerivationWarning> {
    let raw = record.get(field).trim();
    if raw.is_empty() {
        return Err(FieldDerivationWarning::MissingBirthComponent { field });
    }

    // 試算表常把整數欄位匯出成 "7.0"
    raw.parse::<i64>()
        .ok()
        .or_else(|| {
            raw.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite() && v.fract() == 0.0 && v.abs() < 1e9)
                .map(|v| v as i64)
        })
        .ok_or_else(|| FieldDerivationWarning::InvalidBirthComponent {
            field,
            value: raw.to_string(),
        })
}

/// Street, then "city postal-code", then country; the block is trimmed as a
/// whole so blank components leave no stray outer whitespace.
pub fn format_address(record: &Record) -> String {
    format!(
        "{}\n{} {}\n{}",
        record.get("Address 1 - Street"),
        record.get("Address 1 - City"),
        record.get("Address 1 - Postal Code"),
        record.get("Address 1 - Country")
    )
    .trim()
    .to_string()
}
