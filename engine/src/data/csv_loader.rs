//! Turns uploaded bytes into a rectangular [`Table`].
//!
//! The upload's text encoding is unknown, so each configured [`TextEncoding`] is
//! tried in priority order. An attempt only counts when the bytes decode *and*
//! the text parses as CSV with a header row; otherwise the next encoding is
//! tried and the failure message is kept for diagnostics.

use std::borrow::Cow;

use csv::{ReaderBuilder, StringRecord, Trim};
use encoding_rs::WINDOWS_1251;
use serde::Deserialize;

use super::normalizer::normalize_amount;
use crate::config::RequiredColumns;
use crate::error::EngineError;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum TextEncoding {
    /// Strict UTF-8. A leading byte order mark is rejected so that `Utf8Sig` handles it.
    #[serde(rename = "utf-8", alias = "utf8")]
    Utf8,
    /// UTF-8 with an optional byte order mark.
    #[serde(rename = "utf-8-sig")]
    Utf8Sig,
    /// Windows Cyrillic code page.
    #[serde(rename = "cp1251", alias = "windows-1251")]
    Cp1251,
}

impl TextEncoding {
    pub fn label(self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Utf8Sig => "utf-8-sig",
            TextEncoding::Cp1251 => "cp1251",
        }
    }

    pub fn decode(self, bytes: &[u8]) -> Result<Cow<'_, str>, String> {
        match self {
            TextEncoding::Utf8 => {
                if bytes.starts_with(UTF8_BOM) {
                    return Err("'utf-8' codec: unexpected byte order mark".to_string());
                }
                std::str::from_utf8(bytes)
                    .map(Cow::Borrowed)
                    .map_err(|e| format!("'utf-8' codec can't decode: {}", e))
            }
            TextEncoding::Utf8Sig => {
                let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
                std::str::from_utf8(body)
                    .map(Cow::Borrowed)
                    .map_err(|e| format!("'utf-8-sig' codec can't decode: {}", e))
            }
            TextEncoding::Cp1251 => WINDOWS_1251
                .decode_without_bom_handling_and_without_replacement(bytes)
                .ok_or_else(|| "'cp1251' codec can't decode: unmapped byte".to_string()),
        }
    }
}

/// Header row plus data records. Loaded records may be shorter than the header, never wider.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    headers: StringRecord,
    records: Vec<StringRecord>,
}

impl Table {
    /// Builds a table from already-split cells, e.g. when a caller parsed the upload itself.
    /// Rows are not checked against the header width.
    pub fn new<H, R>(headers: H, rows: Vec<R>) -> Self
    where
        H: IntoIterator,
        H::Item: AsRef<str>,
        R: IntoIterator,
        R::Item: AsRef<str>,
    {
        Table {
            headers: headers.into_iter().collect(),
            records: rows.into_iter().map(|row| row.into_iter().collect()).collect(),
        }
    }

    pub fn headers(&self) -> &StringRecord {
        &self.headers
    }

    pub fn records(&self) -> &[StringRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    /// Every name in `names` that is not a header, in the order given.
    pub fn missing_columns(&self, names: &[&str]) -> Vec<String> {
        names
            .iter()
            .filter(|name| self.column_index(name).is_none())
            .map(|name| name.to_string())
            .collect()
    }

    pub fn require_columns(&self, required: &RequiredColumns) -> Result<(), EngineError> {
        let missing = self.missing_columns(&required.names());
        if missing.is_empty() {
            Ok(())
        } else {
            Err(EngineError::MissingColumns(missing))
        }
    }

    /// Cell text of a column; rows too short to hold the column yield an empty string.
    pub fn text_column(&self, name: &str) -> Result<Vec<String>, EngineError> {
        let idx = self
            .column_index(name)
            .ok_or_else(|| EngineError::MissingColumns(vec![name.to_string()]))?;
        Ok(self
            .records
            .iter()
            .map(|record| record.get(idx).unwrap_or_default().to_string())
            .collect())
    }

    /// Coerces a whole column through [`normalize_amount`]. Individual cells never fail and
    /// a row too short to hold the column reads as blank (`0.0`). Only a row wider than the
    /// header, which a caller-built table can contain, is a fault.
    pub fn numeric_column(&self, name: &str) -> Result<Vec<f64>, EngineError> {
        let idx = self
            .column_index(name)
            .ok_or_else(|| EngineError::MissingColumns(vec![name.to_string()]))?;
        let width = self.headers.len();
        self.records
            .iter()
            .enumerate()
            .map(|(row, record)| {
                if record.len() > width {
                    return Err(EngineError::NumericFault(format!(
                        "row {} has {} fields but the header has {}",
                        row + 1,
                        record.len(),
                        width
                    )));
                }
                Ok(normalize_amount(record.get(idx).unwrap_or_default()))
            })
            .collect()
    }
}

/// Result of walking the encoding list.
#[derive(Debug)]
pub enum DecodeOutcome {
    Decoded { table: Table, encoding: TextEncoding },
    Exhausted { last_error: String },
}

pub fn parse_csv_text(text: &str) -> Result<Table, String> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let headers = rdr.headers().map_err(|e| e.to_string())?.clone();
    if headers.iter().all(|header| header.is_empty()) {
        return Err("No columns to parse from file".to_string());
    }

    let mut records = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let record = result.map_err(|e| format!("Error reading CSV record at line {}: {}", idx + 2, e))?;
        // Short rows are padded later as blank cells; extra cells have no column to land in.
        if record.len() > headers.len() {
            return Err(format!(
                "Error reading CSV record at line {}: expected {} fields, saw {}",
                idx + 2,
                headers.len(),
                record.len()
            ));
        }
        records.push(record);
    }
    Ok(Table { headers, records })
}

pub fn decode_table(content: &[u8], encodings: &[TextEncoding]) -> DecodeOutcome {
    let mut last_error = "no text encodings configured".to_string();

    for &encoding in encodings {
        tracing::debug!(encoding = encoding.label(), "Trying encoding");
        let attempt = encoding.decode(content).and_then(|text| {
            let preview: String = text.chars().take(200).collect();
            tracing::debug!(encoding = encoding.label(), preview = %preview, "Decoded content preview");
            parse_csv_text(&text)
        });
        match attempt {
            Ok(table) => {
                tracing::info!(
                    encoding = encoding.label(),
                    columns = ?table.headers().iter().collect::<Vec<_>>(),
                    rows = table.len(),
                    "Successfully read CSV"
                );
                return DecodeOutcome::Decoded { table, encoding };
            }
            Err(e) => {
                tracing::warn!(encoding = encoding.label(), error = %e, "Encoding attempt failed");
                last_error = e;
            }
        }
    }

    DecodeOutcome::Exhausted { last_error }
}

pub fn load_table(content: &[u8], encodings: &[TextEncoding]) -> Result<Table, EngineError> {
    match decode_table(content, encodings) {
        DecodeOutcome::Decoded { table, .. } => Ok(table),
        DecodeOutcome::Exhausted { last_error } => Err(EngineError::UnreadableFile(last_error)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [TextEncoding; 3] = [TextEncoding::Utf8, TextEncoding::Utf8Sig, TextEncoding::Cp1251];

    #[test]
    fn test_plain_utf8_decodes_first() {
        let content = "Month,Date,Total Income,Fixed Expenses\nJan,2024-01-01,1000,600\n";
        match decode_table(content.as_bytes(), &ALL) {
            DecodeOutcome::Decoded { table, encoding } => {
                assert_eq!(encoding, TextEncoding::Utf8);
                assert_eq!(table.len(), 1);
                assert_eq!(table.column_index("Total Income"), Some(2));
            }
            other => panic!("expected decoded table, got {:?}", other),
        }
    }

    #[test]
    fn test_bom_falls_through_to_utf8_sig() {
        let mut content = UTF8_BOM.to_vec();
        content.extend_from_slice(b"Month,Date,Total Income,Fixed Expenses\nJan,2024-01-01,1000,600\n");
        match decode_table(&content, &ALL) {
            DecodeOutcome::Decoded { table, encoding } => {
                assert_eq!(encoding, TextEncoding::Utf8Sig);
                assert_eq!(table.column_index("Month"), Some(0));
            }
            other => panic!("expected decoded table, got {:?}", other),
        }
    }

    #[test]
    fn test_cp1251_fallback() {
        // "Январь" in windows-1251
        let mut content = b"Month,Date,Total Income,Fixed Expenses\n".to_vec();
        content.extend_from_slice(&[0xDF, 0xED, 0xE2, 0xE0, 0xF0, 0xFC]);
        content.extend_from_slice(b",2024-01-01,1000,600\n");
        match decode_table(&content, &ALL) {
            DecodeOutcome::Decoded { table, encoding } => {
                assert_eq!(encoding, TextEncoding::Cp1251);
                assert_eq!(table.text_column("Month").unwrap(), vec!["Январь".to_string()]);
            }
            other => panic!("expected decoded table, got {:?}", other),
        }
    }

    #[test]
    fn test_exhausted_keeps_last_error() {
        let content = [0xFF, 0xFE, 0x00];
        match decode_table(&content, &[TextEncoding::Utf8, TextEncoding::Utf8Sig]) {
            DecodeOutcome::Exhausted { last_error } => assert!(last_error.contains("utf-8-sig")),
            other => panic!("expected exhaustion, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_content_is_unreadable() {
        let err = load_table(b"", &ALL).unwrap_err();
        match err {
            EngineError::UnreadableFile(msg) => assert!(msg.contains("No columns")),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_wide_rows_are_unreadable() {
        let content = "Month,Date,Total Income,Fixed Expenses\nJan,2024-01-01,1000,600,extra\n";
        let err = load_table(content.as_bytes(), &ALL).unwrap_err();
        assert!(matches!(err, EngineError::UnreadableFile(_)));
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_no_encodings_configured() {
        let err = load_table(b"a,b\n1,2\n", &[]).unwrap_err();
        assert!(err.to_string().contains("no text encodings configured"));
    }

    #[test]
    fn test_missing_columns_lists_all() {
        let table = Table::new(["Month", "Total Income"], vec![vec!["Jan", "1000"]]);
        let err = table.require_columns(&RequiredColumns::default()).unwrap_err();
        match err {
            EngineError::MissingColumns(cols) => {
                assert_eq!(cols, vec!["Date".to_string(), "Fixed Expenses".to_string()])
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_headers_are_trimmed() {
        let content = " Month , Date ,Total Income , Fixed Expenses\nJan,2024-01-01, $1,000 ,600\n";
        let table = load_table(content.as_bytes(), &ALL);
        // The unquoted comma inside "$1,000" makes the row wider than the header.
        assert!(table.is_err());

        let content = " Month , Date ,Total Income , Fixed Expenses\nJan,2024-01-01,\" $1,000 \",600\n";
        let table = load_table(content.as_bytes(), &ALL).unwrap();
        assert!(table.require_columns(&RequiredColumns::default()).is_ok());
        assert_eq!(table.numeric_column("Total Income").unwrap(), vec![1000.0]);
    }

    #[test]
    fn test_short_rows_load_as_blank_cells() {
        let content = "Month,Date,Total Income,Fixed Expenses\n\
Jan,2024-01-01,1000,600\n\
Feb,2024-02-01,1200\n\
Mar,2024-03-01\n";
        let table = load_table(content.as_bytes(), &ALL).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.numeric_column("Total Income").unwrap(), vec![1000.0, 1200.0, 0.0]);
        assert_eq!(table.numeric_column("Fixed Expenses").unwrap(), vec![600.0, 0.0, 0.0]);
        assert_eq!(table.text_column("Date").unwrap()[2], "2024-03-01");
    }

    #[test]
    fn test_numeric_column_reads_short_row_as_zero() {
        let table = Table::new(
            ["Month", "Total Income"],
            vec![vec!["Jan", "1000"], vec!["Feb"]],
        );
        assert_eq!(table.numeric_column("Total Income").unwrap(), vec![1000.0, 0.0]);
        assert_eq!(table.text_column("Total Income").unwrap(), vec!["1000".to_string(), String::new()]);
    }

    #[test]
    fn test_numeric_column_faults_on_wide_row() {
        let table = Table::new(
            ["Month", "Total Income"],
            vec![vec!["Jan", "1000", "extra"]],
        );
        match table.numeric_column("Total Income").unwrap_err() {
            EngineError::NumericFault(msg) => assert!(msg.contains("row 1 has 3 fields")),
            other => panic!("unexpected error {:?}", other),
        }
    }
}
