//! CSV reader.
//!
//! The first record is the header row. Cells are typed opportunistically:
//! numeric-looking text becomes a number, `true`/`false` become booleans and
//! empty cells are absent. Only lines with no content at all are skipped; a
//! line of bare delimiters (`,,`) is a row whose fields all default.

use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

use crate::error::{NurtureError, NurtureResult};
use crate::ingest::row::{RawRow, RawValue};

const NUMERIC_PATTERN: &str = r"^\s*-?(\d+\.?|\.\d+|\d+\.\d+)([eE][-+]?\d+)?\s*$";

fn numeric_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(NUMERIC_PATTERN).expect("numeric cell pattern is valid"))
}

/// Reads delimited text into raw rows, one per non-empty data line.
pub fn read_rows(data: &[u8]) -> NurtureResult<Vec<RawRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(data);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| NurtureError::csv(format!("Failed to read CSV headers: {}", e)))?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();

    let mut rows = Vec::new();
    let mut skipped = 0usize;

    for result in reader.records() {
        let record = result.map_err(|e| {
            let line = e.position().map(|p| p.line()).unwrap_or_default();
            NurtureError::csv(format!("Line {}: {}", line, e))
        })?;

        if record.len() == 1 && record[0].is_empty() {
            skipped += 1;
            continue;
        }

        let mut row = RawRow::with_capacity(headers.len());
        for (header, cell) in headers.iter().zip(record.iter()) {
            if header.is_empty() {
                continue;
            }
            row.insert(header.as_str(), type_cell(cell));
        }
        rows.push(row);
    }

    debug!(rows = rows.len(), skipped, columns = headers.len(), "Read CSV rows");
    Ok(rows)
}

/// Dynamic typing applied to every CSV cell.
pub fn type_cell(cell: &str) -> RawValue {
    if cell.is_empty() {
        return RawValue::Absent;
    }
    match cell {
        "true" | "TRUE" => return RawValue::Bool(true),
        "false" | "FALSE" => return RawValue::Bool(false),
        _ => {}
    }
    if numeric_pattern().is_match(cell) {
        if let Ok(number) = cell.trim().parse::<f64>() {
            return RawValue::Number(number);
        }
    }
    RawValue::Text(cell.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_cell() {
        assert_eq!(type_cell(""), RawValue::Absent);
        assert_eq!(type_cell("1000"), RawValue::Number(1000.0));
        assert_eq!(type_cell(" -2.5 "), RawValue::Number(-2.5));
        assert_eq!(type_cell("1e3"), RawValue::Number(1000.0));
        assert_eq!(type_cell("TRUE"), RawValue::Bool(true));
        assert_eq!(type_cell("Jan-2024"), RawValue::from("Jan-2024"));
        assert_eq!(type_cell("1,000"), RawValue::from("1,000"));
        assert_eq!(type_cell("NaN"), RawValue::from("NaN"));
    }

    #[test]
    fn test_read_rows_uses_header_keys() {
        let data = b"Month,Business Unit,Total Sent\nJan-2024,Sales,1000\n";
        let rows = read_rows(data).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("Month"), Some(&RawValue::from("Jan-2024")));
        assert_eq!(rows[0].get("Total Sent"), Some(&RawValue::Number(1000.0)));
    }

    #[test]
    fn test_empty_lines_are_skipped() {
        let data = b"month,opens\n\nFeb-2024,5\n\n\nMar-2024,6\n";
        let rows = read_rows(data).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].get("opens"), Some(&RawValue::Number(6.0)));
    }

    #[test]
    fn test_delimiter_only_line_is_a_row() {
        let data = b"month,opens\n,\nJan-2024,3\n";
        let rows = read_rows(data).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("month"), Some(&RawValue::Absent));
        assert_eq!(rows[0].get("opens"), Some(&RawValue::Absent));
        assert_eq!(rows[1].get("opens"), Some(&RawValue::Number(3.0)));
    }

    #[test]
    fn test_ragged_rows() {
        let data = b"month,opens,clicks\nFeb-2024,5\nMar-2024,6,1,extra\n";
        let rows = read_rows(data).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("clicks"), None);
        assert_eq!(rows[1].len(), 3);
    }

    #[test]
    fn test_byte_order_mark_is_stripped() {
        let data = "\u{feff}month,opens\nFeb-2024,5\n".as_bytes();
        let rows = read_rows(data).unwrap();
        assert!(rows[0].get("month").is_some());
    }

    #[test]
    fn test_invalid_utf8_fails_whole_file() {
        let data = b"month,opens\nFeb-2024,5\n\xff\xfe,6\n";
        let error = read_rows(data).unwrap_err();
        assert_eq!(error.error_code(), "CSV_PARSE_ERROR");
    }
}
