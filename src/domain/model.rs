use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// 原始表格：標頭照來源檔案的順序保留，儲存格尚未正規化
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Index of a source column, matched after trimming the header text.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.trim() == name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn head(&self, n: usize) -> RawTable {
        RawTable {
            headers: self.headers.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }
}

/// One contact keyed by target column name.
///
/// Missing keys read as empty string, so "absent" and "empty" are the same
/// thing to every consumer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub data: HashMap<String, String>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> &str {
        self.data.get(key).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.data.insert(key.into(), value.into());
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// 已定稿的 Google 聯絡人表格：欄位固定、順序固定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactTable {
    pub columns: Vec<String>,
    pub records: Vec<Record>,
}

impl ContactTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Cells of one record in column order.
    pub fn row(&self, index: usize) -> Option<Vec<&str>> {
        let record = self.records.get(index)?;
        Some(self.columns.iter().map(|c| record.get(c)).collect())
    }

    pub fn head(&self, n: usize) -> ContactTable {
        ContactTable {
            columns: self.columns.clone(),
            records: self.records.iter().take(n).cloned().collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceEncoding {
    Utf8,
    /// Windows-1252, the permissive single-byte fallback.
    SingleByte,
}

/// 解碼、偵測分隔符號並解析完成的來源檔
#[derive(Debug, Clone)]
pub struct SourceTable {
    pub table: RawTable,
    pub delimiter: u8,
    pub encoding: SourceEncoding,
}

#[derive(Debug, Clone, Serialize)]
pub struct Preview {
    pub source: RawTable,
    pub converted: ContactTable,
}

impl Preview {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for Preview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Source ({} rows)", self.source.len())?;
        write_grid(
            f,
            &self.source.headers,
            self.source
                .rows
                .iter()
                .map(|row| row.iter().map(String::as_str).collect()),
        )?;
        writeln!(f)?;
        writeln!(f, "Google Contacts ({} rows)", self.converted.len())?;
        write_grid(
            f,
            &self.converted.columns,
            (0..self.converted.len()).filter_map(|i| self.converted.row(i)),
        )
    }
}

fn write_grid<'a>(
    f: &mut fmt::Formatter<'_>,
    headers: &[String],
    rows: impl Iterator<Item = Vec<&'a str>>,
) -> fmt::Result {
    writeln!(f, "{}", headers.join(" | "))?;
    for row in rows {
        let cells: Vec<String> = row.iter().map(|cell| cell.replace('\n', " / ")).collect();
        writeln!(f, "{}", cells.join(" | "))?;
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct Conversion {
    pub delimiter: u8,
    pub encoding: SourceEncoding,
    pub table: ContactTable,
    pub csv_output: Vec<u8>,
    pub preview: Preview,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_missing_key_reads_empty() {
        let record = Record::new().with("First Name", "Ayşe");
        assert_eq!(record.get("First Name"), "Ayşe");
        assert_eq!(record.get("Last Name"), "");
        assert!(!record.contains_key("Last Name"));
    }

    #[test]
    fn test_raw_table_column_index_trims_headers() {
        let table = RawTable::new(
            vec!["Adı".to_string(), " Soyadı ".to_string()],
            vec![vec!["Ayşe".to_string(), "Yılmaz".to_string()]],
        );
        assert_eq!(table.column_index("Soyadı"), Some(1));
        assert_eq!(table.column_index("Kurum"), None);
    }

    #[test]
    fn test_contact_table_row_follows_column_order() {
        let table = ContactTable {
            columns: vec!["Last Name".to_string(), "First Name".to_string()],
            records: vec![Record::new().with("First Name", "Jane").with("Last Name", "Doe")],
        };
        assert_eq!(table.row(0), Some(vec!["Doe", "Jane"]));
        assert_eq!(table.row(1), None);
    }

    #[test]
    fn test_preview_display() {
        let preview = Preview {
            source: RawTable::new(vec!["Ev adresi".to_string()], vec![vec!["a\nb".to_string()]]),
            converted: ContactTable {
                columns: vec!["Address 1 - Street".to_string()],
                records: vec![Record::new().with("Address 1 - Street", "a\nb")],
            },
        };
        let text = preview.to_string();
        assert!(text.starts_with("Source (1 rows)\nEv adresi\na / b\n"));
        assert!(text.contains("Google Contacts (1 rows)\nAddress 1 - Street\na / b\n"));

        let json: serde_json::Value = serde_json::from_str(&preview.to_json().unwrap()).unwrap();
        assert_eq!(json["source"]["headers"][0], "Ev adresi");
        assert_eq!(json["converted"]["records"][0]["data"]["Address 1 - Street"], "a\nb");
    }
}
