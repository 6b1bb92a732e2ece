//! Campaign File Ingestion
//!
//! Turns uploaded CSV, Excel (XLS/XLSX/XLSM) and JSON files into normalized
//! [`CampaignRecord`](mailpulse_models::CampaignRecord) sequences.
//!
//! Row-level defects (missing columns, non-numeric counts, unparseable
//! months) resolve to defaults. File-level defects (unreadable bytes, invalid
//! JSON, corrupt workbooks, unsupported extensions) fail the whole parse.

pub mod dispatch;
pub mod month;
pub mod normalizer;
pub mod readers;
pub mod row;
pub mod upload;

pub use dispatch::{parse_bytes, sheet_names_from_bytes, FileFormat};
pub use month::{normalize_month, serial_to_month};
pub use normalizer::{FieldNormalizer, SPREADSHEET_ALIASES, TABULAR_ALIASES};
pub use readers::WorkbookKind;
pub use row::{RawRow, RawValue};
pub use upload::{
    load_upload, parse_file, parse_upload, sheet_names, upload_sheet_names, UploadOutcome,
    UploadedFile,
};
