//! Uploaded files and the async entry points.
//!
//! File bytes are read once (the only suspension point); parsing then runs
//! synchronously over the owned buffer.

use mailpulse_models::CampaignRecord;
use std::path::Path;
use tracing::{info, warn};

use super::dispatch::{parse_bytes, sheet_names_from_bytes, FileFormat};
use crate::config::IngestConfig;
use crate::error::{NurtureError, NurtureResult};
use crate::validation::{validate_file_size, validate_file_type};

/// A user-supplied file held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub name: String,
    pub contents: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            contents: contents.into(),
        }
    }

    /// Reads a file from disk, naming it after the path's final component.
    pub async fn from_path(path: impl AsRef<Path>) -> NurtureResult<Self> {
        let path = path.as_ref();
        let contents = tokio::fs::read(path)
            .await
            .map_err(|e| NurtureError::file_read(path.display().to_string(), e.to_string()))?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self::new(name, contents))
    }

    pub fn size(&self) -> u64 {
        self.contents.len() as u64
    }

    pub fn format(&self) -> NurtureResult<FileFormat> {
        FileFormat::detect(&self.name)
    }
}

/// Parses an in-memory upload, selecting the reader by extension.
pub fn parse_upload(file: &UploadedFile, sheet: Option<&str>) -> NurtureResult<Vec<CampaignRecord>> {
    parse_bytes(&file.name, &file.contents, sheet)
}

/// Sheet names of an in-memory spreadsheet upload.
pub fn upload_sheet_names(file: &UploadedFile) -> NurtureResult<Vec<String>> {
    sheet_names_from_bytes(&file.name, &file.contents)
}

/// Reads and parses the file at `path`.
pub async fn parse_file(
    path: impl AsRef<Path>,
    sheet: Option<&str>,
) -> NurtureResult<Vec<CampaignRecord>> {
    let file = UploadedFile::from_path(path).await?;
    parse_upload(&file, sheet)
}

/// Sheet names of the spreadsheet at `path`.
pub async fn sheet_names(path: impl AsRef<Path>) -> NurtureResult<Vec<String>> {
    let file = UploadedFile::from_path(path).await?;
    upload_sheet_names(&file)
}

/// Result of accepting an upload.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadOutcome {
    /// Records parsed from the file (or its only sheet).
    Loaded {
        records: Vec<CampaignRecord>,
        sheet: Option<String>,
    },
    /// The workbook has several sheets; the caller must pick one and call
    /// [`parse_upload`] with it. `sheets[0]` is the default choice.
    SheetSelectionRequired { sheets: Vec<String> },
}

/// Validates an upload and loads it, deferring multi-sheet workbooks to a
/// sheet selection step.
pub fn load_upload(file: &UploadedFile, config: &IngestConfig) -> NurtureResult<UploadOutcome> {
    validate_file_type(&file.name, &config.allowed_extensions())?;
    validate_file_size(file.size(), config.max_file_size_bytes)?;

    let format = file.format()?;
    if format.is_spreadsheet() {
        let sheets = upload_sheet_names(file)?;
        if sheets.len() > 1 {
            info!(file_name = %file.name, sheets = sheets.len(), "Multiple sheets detected");
            return Ok(UploadOutcome::SheetSelectionRequired { sheets });
        }

        let sheet = sheets.into_iter().next();
        let records = parse_upload(file, sheet.as_deref())?;
        return Ok(UploadOutcome::Loaded { records, sheet });
    }

    let records = parse_upload(file, None)?;
    if records.is_empty() {
        warn!(file_name = %file.name, "Upload contained no data rows");
    }
    Ok(UploadOutcome::Loaded {
        records,
        sheet: None,
    })
}
