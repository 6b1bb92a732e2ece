//! Format readers: raw file bytes to [`RawRow`](super::RawRow) sequences.

pub mod delimited;
pub mod json;
pub mod workbook;

pub use workbook::WorkbookKind;
