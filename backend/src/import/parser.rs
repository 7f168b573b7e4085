//! Line-oriented CSV splitting for the reservation import.
//!
//! Fields are split on every comma. Quoted fields cannot carry commas and
//! `""` is not unescaped; every `"` is simply dropped from a value.

use super::ImportError;
use std::collections::HashMap;

/// One data line keyed by header column name.
pub type RawRow = HashMap<String, String>;

const UTF8_BOM: char = '\u{FEFF}';

/// Header columns and the data lines that follow them.
#[derive(Debug)]
pub struct CsvLines<'a> {
    pub header: Vec<String>,
    pub rows: Vec<&'a str>,
}

/// Reject uploads whose name does not carry the `.csv` extension.
pub fn ensure_csv_file_name(file_name: &str) -> Result<(), ImportError> {
    if file_name.to_ascii_lowercase().ends_with(".csv") {
        Ok(())
    } else {
        Err(ImportError::Format(format!(
            "'{}' is not a .csv file",
            file_name
        )))
    }
}

/// Decode the upload as UTF-8 text.
pub fn decode(contents: &[u8]) -> Result<&str, ImportError> {
    std::str::from_utf8(contents)
        .map_err(|_| ImportError::Format("file is not valid UTF-8 text".to_string()))
}

/// Split the text into the header and the remaining non-blank lines.
///
/// An input without any non-blank line yields an empty header.
pub fn split_lines(text: &str) -> CsvLines<'_> {
    let text = text.strip_prefix(UTF8_BOM).unwrap_or(text);
    let mut lines = text.split('\n').filter(|line| !line.trim().is_empty());

    let header = lines
        .next()
        .map(|line| line.split(',').map(|h| h.trim().to_string()).collect())
        .unwrap_or_default();

    CsvLines {
        header,
        rows: lines.collect(),
    }
}

/// Required columns absent from the header, in `required` order.
pub fn missing_columns(header: &[String], required: &[&str]) -> Vec<String> {
    required
        .iter()
        .filter(|col| !header.iter().any(|h| h == *col))
        .map(|col| col.to_string())
        .collect()
}

fn normalize_cell(cell: &str) -> String {
    cell.trim().replace('"', "")
}

/// Pair a data line with the header.
///
/// Returns `None` when the line has fewer values than the header has
/// columns. Values past the last column are ignored.
pub fn parse_row(header: &[String], line: &str) -> Option<RawRow> {
    let values: Vec<String> = line.split(',').map(normalize_cell).collect();
    if values.len() < header.len() {
        return None;
    }
    Some(header.iter().cloned().zip(values).collect())
}
