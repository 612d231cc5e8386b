use crate::core::decode::decode_bytes;
use crate::core::formatter::format_fields;
use crate::core::mapper::map_columns;
use crate::core::name_inference::infer_name;
use crate::core::reader::parse_table;
use crate::core::schema::{finalize, to_csv_bytes};
use crate::core::sniffer::{sniff_delimiter, DEFAULT_DELIMITER, DEFAULT_SAMPLE_SIZE};
use crate::domain::model::{Conversion, Preview, RawTable, SourceEncoding, SourceTable};
use crate::utils::error::{ConvertError, Result};

pub const DEFAULT_PREVIEW_ROWS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Bytes inspected by the delimiter sniffer.
    pub sample_size: usize,
    pub preview_rows: usize,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            sample_size: DEFAULT_SAMPLE_SIZE,
            preview_rows: DEFAULT_PREVIEW_ROWS,
        }
    }
}

/// Turns an uploaded contacts export into a Google Contacts CSV.
///
/// Holds only options; every call works on its own tables, so one converter
/// can be shared across threads and requests.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    options: ConvertOptions,
}

impl Converter {
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Decode, sniff and parse. Fails on empty, undecodable or malformed input.
    pub fn read_table(&self, bytes: &[u8]) -> Result<SourceTable> {
        // 先偷看樣本決定分隔符號，再用它解析整份檔案
        let delimiter = sniff_delimiter(bytes, self.options.sample_size);
        let (text, encoding) = decode_bytes(bytes)?;
        let table = parse_table(&text, delimiter)?;

        tracing::info!(
            "📥 Read {} rows ({} columns, delimiter {:?}, {:?})",
            table.len(),
            table.headers.len(),
            delimiter as char,
            encoding
        );

        Ok(SourceTable {
            table,
            delimiter,
            encoding,
        })
    }

    /// Map, derive, infer names, finalize and serialize.
    pub fn convert_table(&self, source: &SourceTable) -> Result<Conversion> {
        if source.table.is_empty() {
            return Err(ConvertError::EmptyInput);
        }

        let records = map_columns(&source.table)
            .iter()
            .map(format_fields)
            .map(|record| infer_name(&record))
            .collect();

        let table = finalize(records);
        let csv_output = to_csv_bytes(&table)?;

        tracing::info!(
            "🔧 Converted {} contacts into {} columns ({} bytes)",
            table.len(),
            table.columns.len(),
            csv_output.len()
        );

        let preview = Preview {
            source: source.table.head(self.options.preview_rows),
            converted: table.head(self.options.preview_rows),
        };

        Ok(Conversion {
            delimiter: source.delimiter,
            encoding: source.encoding,
            table,
            csv_output,
            preview,
        })
    }

    pub fn convert(&self, bytes: &[u8]) -> Result<Conversion> {
        let source = self.read_table(bytes)?;
        self.convert_table(&source)
    }

    /// Converts an already-parsed table, e.g. one built in memory by a caller.
    pub fn convert_raw(&self, table: RawTable) -> Result<Conversion> {
        self.convert_table(&SourceTable {
            table,
            delimiter: DEFAULT_DELIMITER,
            encoding: SourceEncoding::Utf8,
        })
    }
}

/// One-shot conversion with default options.
pub fn convert(bytes: &[u8]) -> Result<Conversion> {
    Converter::default().convert(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::{GOOGLE_COLUMNS, UTF8_BOM};

    const SAMPLE: &str = "Adı;Soyadı;Birinci e-posta;Doğum yılı;Doğum ayı;Doğum günü;Ev adresi;Ev şehri;Ev posta kodu;Ev ülkesi;Gizli\n\
Ayşe;Yılmaz;ayse@example.com;1990;7;4;Atatürk Cd. 5;İzmir;35210;Türkiye;x\n\
;;jane.doe@example.com;;;;;;;;y\n";

    #[test]
    fn test_end_to_end_semicolon_utf8() {
        let conversion = convert(SAMPLE.as_bytes()).unwrap();

        assert_eq!(conversion.delimiter, b';');
        assert_eq!(conversion.encoding, SourceEncoding::Utf8);
        assert_eq!(conversion.table.len(), 2);
        assert_eq!(conversion.table.columns, GOOGLE_COLUMNS.to_vec());

        let ayse = &conversion.table.records[0];
        assert_eq!(ayse.get("First Name"), "Ayşe");
        assert_eq!(ayse.get("Birthday"), "07/04/1990");
        assert_eq!(ayse.get("Address 1 - Formatted"), "Atatürk Cd. 5\nİzmir 35210\nTürkiye");

        let jane = &conversion.table.records[1];
        assert_eq!(jane.get("First Name"), "Jane");
        assert_eq!(jane.get("Last Name"), "Doe");
        assert_eq!(jane.get("File As"), "Jane Doe");
        assert_eq!(jane.get("Birthday"), "");
        assert_eq!(jane.get("Address 1 - Formatted"), "");

        assert!(conversion.csv_output.starts_with(UTF8_BOM));
    }

    #[test]
    fn test_every_record_has_canonical_columns() {
        let conversion = convert(SAMPLE.as_bytes()).unwrap();
        for record in &conversion.table.records {
            assert_eq!(record.data.len(), GOOGLE_COLUMNS.len());
            for column in GOOGLE_COLUMNS {
                assert!(record.contains_key(column));
            }
        }
    }

    #[test]
    fn test_missing_birth_year_column() {
        let input = "Adı,Doğum ayı,Doğum günü\nAyşe,7,4\nMehmet,1,1\n";
        let conversion = convert(input.as_bytes()).unwrap();
        for record in &conversion.table.records {
            assert_eq!(record.get("Birthday"), "");
        }
    }

    #[test]
    fn test_bad_birthday_only_affects_its_row() {
        let input = "Adı,Doğum yılı,Doğum ayı,Doğum günü\nA,1990,xx,4\nB,1991,2,3\n";
        let conversion = convert(input.as_bytes()).unwrap();
        assert_eq!(conversion.table.records[0].get("Birthday"), "");
        assert_eq!(conversion.table.records[1].get("Birthday"), "02/03/1991");
    }

    #[test]
    fn test_empty_inputs() {
        assert!(matches!(convert(b""), Err(ConvertError::EmptyInput)));
        assert!(matches!(convert("Adı,Soyadı\n".as_bytes()), Err(ConvertError::EmptyInput)));
    }

    #[test]
    fn test_malformed_input_is_parse_error() {
        let input = "Adı,Soyadı\nAyşe,Yılmaz,extra,cells\n";
        assert!(matches!(
            convert(input.as_bytes()),
            Err(ConvertError::ParseError { .. })
        ));
    }

    #[test]
    fn test_latin1_input_falls_back() {
        let mut bytes = b"Notlar,Birinci e-posta\n".to_vec();
        bytes.extend_from_slice(b"Caf\xe9,jose.garcia@example.com\n");
        let conversion = convert(&bytes).unwrap();

        assert_eq!(conversion.encoding, SourceEncoding::SingleByte);
        let record = &conversion.table.records[0];
        assert_eq!(record.get("Notes"), "Café");
        assert_eq!(record.get("First Name"), "Jose");
    }

    #[test]
    fn test_preview_is_limited() {
        let converter = Converter::new(ConvertOptions {
            preview_rows: 1,
            ..ConvertOptions::default()
        });
        let conversion = converter.convert(SAMPLE.as_bytes()).unwrap();
        assert_eq!(conversion.preview.source.len(), 1);
        assert_eq!(conversion.preview.converted.len(), 1);
        assert_eq!(conversion.preview.source.headers.len(), 11);
        assert_eq!(conversion.table.len(), 2);
    }

    #[test]
    fn test_semicolon_file_with_one_short_row() {
        let mut input = String::from("Adı;Soyadı;Birinci e-posta;Notlar\n");
        for i in 0..10 {
            input.push_str(&format!("Kişi{};Soyad;kisi{}@example.com;not\n", i, i));
        }
        input.push_str("Eksik;Soyad;eksik@example.com\n");

        let conversion = convert(input.as_bytes()).unwrap();
        assert_eq!(conversion.delimiter, b';');
        assert_eq!(conversion.table.len(), 11);

        let first = &conversion.table.records[0];
        assert_eq!(first.get("First Name"), "Kişi0");
        assert_eq!(first.get("E-mail 1 - Value"), "kisi0@example.com");
        assert_eq!(first.get("Notes"), "not");

        let short = &conversion.table.records[10];
        assert_eq!(short.get("First Name"), "Eksik");
        assert_eq!(short.get("E-mail 1 - Value"), "eksik@example.com");
        assert_eq!(short.get("Notes"), "");
    }

    #[test]
    fn test_stray_quote_does_not_hide_the_delimiter() {
        let input = "Adı;Notlar\nAyşe;3.5\" disket\nMehmet;x\n";
        let conversion = convert(input.as_bytes()).unwrap();
        assert_eq!(conversion.delimiter, b';');
        assert_eq!(conversion.table.records[0].get("Notes"), "3.5\" disket");
        assert_eq!(conversion.table.records[1].get("First Name"), "Mehmet");
    }

    #[test]
    fn test_convert_raw_table() {
        let table = RawTable::new(
            vec!["Takma adı".to_string()],
            vec![vec![" Ayşecik ".to_string()]],
        );
        let conversion = Converter::default().convert_raw(table).unwrap();
        assert_eq!(conversion.table.records[0].get("Nickname"), "Ayşecik");
        assert_eq!(conversion.table.records[0].get("First Name"), "");
    }
}
