use crate::domain::model::{RawTable, Record};

/// Source (Turkish export) header → Google Contacts header.
pub const COLUMN_MAPPING: [(&str, &str); 24] = [
    // 姓名
    ("Adı", "First Name"),
    ("Soyadı", "Last Name"),
    ("Takma adı", "Nickname"),
    ("Görüntülenecek ad", "File As"),
    // 聯絡方式
    ("Birinci e-posta", "E-mail 1 - Value"),
    ("İkinci e-posta", "E-mail 2 - Value"),
    ("Cep telefonu", "Phone 1 - Value"),
    ("İş telefonu", "Phone 2 - Value"),
    ("Ev telefonu", "Phone 3 - Value"),
    // 組織
    ("Kurum", "Organization Name"),
    ("İş unvanı", "Organization Title"),
    ("Bölüm", "Organization Department"),
    // 住址
    ("Ev adresi", "Address 1 - Street"),
    ("Ev adresi 2", "Address 1 - Extended Address"),
    ("Ev şehri", "Address 1 - City"),
    ("Ev bölgesi", "Address 1 - Region"),
    ("Ev posta kodu", "Address 1 - Postal Code"),
    ("Ev ülkesi", "Address 1 - Country"),
    // 其他
    ("Doğum yılı", "Birth Year"),
    ("Doğum ayı", "Birth Month"),
    ("Doğum günü", "Birth Day"),
    ("Web sayfası 1", "Website 1 - Value"),
    ("Web sayfası 2", "Website 2 - Value"),
    ("Notlar", "Notes"),
];

/// Fixed label values, independent of row content.
pub const LABEL_COLUMNS: [(&str, &str); 8] = [
    ("E-mail 1 - Label", "Work"),
    ("E-mail 2 - Label", "Home"),
    ("Phone 1 - Label", "Mobile"),
    ("Phone 2 - Label", "Work"),
    ("Phone 3 - Label", "Home"),
    ("Website 1 - Label", "Work"),
    ("Website 2 - Label", "Home"),
    ("Address 1 - Label", "Home"),
];

/// Translates every source row into an intermediate [`Record`].
///
/// Mapped cells are trimmed; a mapping whose source column is absent yields
/// an empty string on every row. Unmapped source columns are dropped.
pub fn map_columns(table: &RawTable) -> Vec<Record> {
    let resolved: Vec<(Option<usize>, &str)> = COLUMN_MAPPING
        .iter()
        .map(|&(source, target)| (table.column_index(source), target))
        .collect();

    let missing: Vec<&str> = COLUMN_MAPPING
        .iter()
        .zip(&resolved)
        .filter(|(_, (index, _))| index.is_none())
        .map(|((source, _), _)| *source)
        .collect();
    if !missing.is_empty() {
        tracing::debug!("Source columns not present, left empty: {:?}", missing);
    }

    table
        .rows
        .iter()
        .map(|row| map_row(row, &resolved))
        .collect()
}

fn map_row(row: &[String], resolved: &[(Option<usize>, &str)]) -> Record {
    let mut record = Record::new();

    for &(index, target) in resolved {
        let value = index
            .and_then(|i| row.get(i))
            .map(|cell| cell.trim())
            .unwrap_or("");
        record.set(target, value);
    }

    for &(column, label) in LABEL_COLUMNS.iter() {
        record.set(column, label);
    }

    record
}
