//! Extension-based dispatch to the format readers.

use mailpulse_models::CampaignRecord;
use tracing::{debug, info};

use super::normalizer::FieldNormalizer;
use super::readers::{delimited, json, workbook, WorkbookKind};
use super::row::RawRow;
use crate::error::{NurtureError, NurtureResult};
use crate::validation::file_extension;

/// Supported upload formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Spreadsheet(WorkbookKind),
    Json,
}

impl FileFormat {
    /// Detect format from the text after the final `.` of a file name, ignoring case
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        match file_extension(file_name)?.as_str() {
            "csv" => Some(Self::Csv),
            "xls" => Some(Self::Spreadsheet(WorkbookKind::Xls)),
            "xlsx" | "xlsm" => Some(Self::Spreadsheet(WorkbookKind::Xlsx)),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Like [`FileFormat::from_file_name`], failing with `UnsupportedFormat`.
    pub fn detect(file_name: &str) -> NurtureResult<Self> {
        Self::from_file_name(file_name).ok_or_else(|| NurtureError::unsupported_format(file_name))
    }

    pub fn is_spreadsheet(&self) -> bool {
        matches!(self, Self::Spreadsheet(_))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Csv => "CSV",
            Self::Spreadsheet(_) => "Excel",
            Self::Json => "JSON",
        }
    }

    /// Alias table used for rows read in this format.
    pub fn normalizer(&self) -> FieldNormalizer {
        match self {
            Self::Spreadsheet(_) => FieldNormalizer::spreadsheet(),
            Self::Csv | Self::Json => FieldNormalizer::tabular(),
        }
    }

    /// Reads raw rows. `sheet` only applies to spreadsheets.
    pub fn read_rows(&self, data: &[u8], sheet: Option<&str>) -> NurtureResult<Vec<RawRow>> {
        match self {
            Self::Csv => delimited::read_rows(data),
            Self::Spreadsheet(kind) => workbook::read_rows(*kind, data, sheet),
            Self::Json => json::read_rows(data),
        }
    }

    /// Reads and normalizes every row, in source order.
    pub fn parse(&self, data: &[u8], sheet: Option<&str>) -> NurtureResult<Vec<CampaignRecord>> {
        let rows = self.read_rows(data, sheet)?;
        Ok(self.normalizer().normalize_all(&rows))
    }
}

/// Parses file contents, choosing the reader from the file name.
pub fn parse_bytes(
    file_name: &str,
    data: &[u8],
    sheet: Option<&str>,
) -> NurtureResult<Vec<CampaignRecord>> {
    let format = FileFormat::detect(file_name)?;
    debug!(file_name, format = format.name(), bytes = data.len(), "Dispatching upload");

    let records = format.parse(data, sheet)?;
    info!(
        file_name,
        format = format.name(),
        sheet = sheet.unwrap_or_default(),
        records = records.len(),
        "Parsed campaign records"
    );
    Ok(records)
}

/// Sheet names of a spreadsheet file. Other formats are rejected.
pub fn sheet_names_from_bytes(file_name: &str, data: &[u8]) -> NurtureResult<Vec<String>> {
    match FileFormat::detect(file_name)? {
        FileFormat::Spreadsheet(kind) => workbook::sheet_names(kind, data),
        other => Err(NurtureError::validation(
            "file_type",
            format!("{} files do not contain sheets", other.name()),
        )),
    }
}
