//! Spreadsheet reader and sheet enumeration.
//!
//! Workbooks are opened from memory. Numeric and date cells keep their raw
//! serial value so that month columns go through serial conversion rather
//! than a formatted display string.

use calamine::{DataType, Range, Reader, Sheets, Xls, Xlsx};
use std::io::Cursor;
use tracing::{debug, warn};

use crate::error::{NurtureError, NurtureResult};
use crate::ingest::row::{RawRow, RawValue};

/// Binary container formats the spreadsheet reader understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkbookKind {
    /// Legacy BIFF `.xls`
    Xls,
    /// Office Open XML `.xlsx` / `.xlsm`
    Xlsx,
}

fn open(kind: WorkbookKind, data: &[u8]) -> NurtureResult<Sheets<Cursor<&[u8]>>> {
    let cursor = Cursor::new(data);
    let workbook = match kind {
        WorkbookKind::Xls => Sheets::Xls(Xls::new(cursor).map_err(|e| {
            NurtureError::spreadsheet(format!("Failed to open workbook: {}", e))
        })?),
        WorkbookKind::Xlsx => Sheets::Xlsx(Xlsx::new(cursor).map_err(|e| {
            NurtureError::spreadsheet(format!("Failed to open workbook: {}", e))
        })?),
    };
    Ok(workbook)
}

/// Ordered sheet names of a workbook. Row data is not read.
pub fn sheet_names(kind: WorkbookKind, data: &[u8]) -> NurtureResult<Vec<String>> {
    let workbook = open(kind, data)?;
    Ok(workbook.sheet_names().to_vec())
}

/// Reads the requested sheet (or the first one) into raw rows.
///
/// The first row of the sheet's used range is the header row; fully empty
/// rows are skipped and empty header cells drop their column.
pub fn read_rows(
    kind: WorkbookKind,
    data: &[u8],
    sheet: Option<&str>,
) -> NurtureResult<Vec<RawRow>> {
    let mut workbook = open(kind, data)?;
    let names = workbook.sheet_names().to_vec();

    let sheet_name = match sheet {
        Some(requested) => {
            if !names.iter().any(|name| name == requested) {
                warn!(sheet = requested, available = ?names, "Requested sheet not in workbook");
                return Err(NurtureError::sheet_not_found(requested));
            }
            requested.to_string()
        }
        None => names.first().cloned().ok_or(NurtureError::EmptyWorkbook)?,
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .ok_or_else(|| NurtureError::sheet_not_found(sheet_name.as_str()))?
        .map_err(|e| NurtureError::spreadsheet(format!("Failed to read worksheet: {}", e)))?;

    let rows = range_to_rows(&range);
    debug!(sheet = %sheet_name, rows = rows.len(), "Read worksheet rows");
    Ok(rows)
}

fn range_to_rows(range: &Range<DataType>) -> Vec<RawRow> {
    let mut rows_iter = range.rows();

    let headers: Vec<String> = match rows_iter.next() {
        Some(header_row) => header_row.iter().map(header_text).collect(),
        None => return Vec::new(),
    };

    rows_iter
        .filter(|cells| cells.iter().any(|cell| !cell_value(cell).is_absent()))
        .map(|cells| {
            let mut row = RawRow::with_capacity(headers.len());
            for (header, cell) in headers.iter().zip(cells.iter()) {
                if header.is_empty() {
                    continue;
                }
                row.insert(header.as_str(), cell_value(cell));
            }
            row
        })
        .collect()
}

fn header_text(cell: &DataType) -> String {
    match cell_value(cell) {
        RawValue::Absent => String::new(),
        value => value.to_text().trim().to_string(),
    }
}

/// Raw cell content: numbers and date serials stay numeric, text stays text.
pub fn cell_value(cell: &DataType) -> RawValue {
    match cell {
        DataType::Int(i) => RawValue::Number(*i as f64),
        DataType::Float(f) => RawValue::Number(*f),
        DataType::DateTime(serial) => RawValue::Number(*serial),
        DataType::String(s) => RawValue::Text(s.clone()),
        DataType::Bool(b) => RawValue::Bool(*b),
        DataType::Empty => RawValue::Absent,
        DataType::Error(_) => RawValue::Absent,
        #[allow(unreachable_patterns)]
        other => RawValue::Text(other.to_string()),
    }
}
