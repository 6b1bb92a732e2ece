use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum NurtureError {
    #[error("Unsupported file format: {file_name}")]
    UnsupportedFormat { file_name: String },

    #[error("Failed to read file {path}: {message}")]
    FileRead { path: String, message: String },

    #[error("CSV error: {message}")]
    Csv { message: String },

    #[error("JSON error: {message}")]
    Json { message: String },

    #[error("Spreadsheet error: {message}")]
    Spreadsheet { message: String },

    #[error("Sheet not found: {sheet}")]
    SheetNotFound { sheet: String },

    #[error("Workbook contains no sheets")]
    EmptyWorkbook,

    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl NurtureError {
    pub fn unsupported_format(file_name: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            file_name: file_name.into(),
        }
    }

    pub fn file_read(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::FileRead {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn csv(message: impl Into<String>) -> Self {
        Self::Csv {
            message: message.into(),
        }
    }

    pub fn json(message: impl Into<String>) -> Self {
        Self::Json {
            message: message.into(),
        }
    }

    pub fn spreadsheet(message: impl Into<String>) -> Self {
        Self::Spreadsheet {
            message: message.into(),
        }
    }

    pub fn sheet_not_found(sheet: impl Into<String>) -> Self {
        Self::SheetNotFound {
            sheet: sheet.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnsupportedFormat { .. } => "UNSUPPORTED_FORMAT",
            Self::FileRead { .. } => "FILE_READ_ERROR",
            Self::Csv { .. } => "CSV_PARSE_ERROR",
            Self::Json { .. } => "JSON_PARSE_ERROR",
            Self::Spreadsheet { .. } => "SPREADSHEET_PARSE_ERROR",
            Self::SheetNotFound { .. } => "SHEET_NOT_FOUND",
            Self::EmptyWorkbook => "EMPTY_WORKBOOK",
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::Configuration { .. } => "CONFIGURATION_ERROR",
            Self::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    /// Short message suitable for a user-facing notification.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::UnsupportedFormat { .. } => "Unsupported file format",
            Self::SheetNotFound { .. } => "Failed to parse selected sheet.",
            Self::Validation { .. } => "The uploaded file was rejected.",
            Self::Configuration { .. } | Self::Internal { .. } => "Something went wrong.",
            _ => "Failed to parse file. Please check the format.",
        }
    }

    /// Whether the failure comes from the uploaded file rather than the application.
    pub fn is_file_level(&self) -> bool {
        !matches!(self, Self::Configuration { .. } | Self::Internal { .. })
    }
}

pub type NurtureResult<T> = Result<T, NurtureError>;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorNotice {
    pub code: String,
    pub title: String,
    pub detail: String,
}

impl From<&NurtureError> for ErrorNotice {
    fn from(error: &NurtureError) -> Self {
        Self {
            code: error.error_code().to_string(),
            title: error.user_message().to_string(),
            detail: error.to_string(),
        }
    }
}

// Conversion from common error types
impl From<csv::Error> for NurtureError {
    fn from(error: csv::Error) -> Self {
        Self::csv(error.to_string())
    }
}

impl From<serde_json::Error> for NurtureError {
    fn from(error: serde_json::Error) -> Self {
        Self::json(error.to_string())
    }
}

impl From<calamine::Error> for NurtureError {
    fn from(error: calamine::Error) -> Self {
        Self::spreadsheet(error.to_string())
    }
}

impl From<calamine::XlsxError> for NurtureError {
    fn from(error: calamine::XlsxError) -> Self {
        Self::spreadsheet(error.to_string())
    }
}

impl From<calamine::XlsError> for NurtureError {
    fn from(error: calamine::XlsError) -> Self {
        Self::spreadsheet(error.to_string())
    }
}

impl From<config::ConfigError> for NurtureError {
    fn from(error: config::ConfigError) -> Self {
        Self::configuration(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_and_messages() {
        let error = NurtureError::unsupported_format("report.txt");
        assert_eq!(error.error_code(), "UNSUPPORTED_FORMAT");
        assert_eq!(error.to_string(), "Unsupported file format: report.txt");
        assert_eq!(error.user_message(), "Unsupported file format");
        assert!(error.is_file_level());

        let error = NurtureError::json("expected value at line 1 column 1");
        assert_eq!(error.user_message(), "Failed to parse file. Please check the format.");
        assert!(!NurtureError::internal("boom").is_file_level());
    }

    #[test]
    fn test_error_notice() {
        let error = NurtureError::sheet_not_found("Q3");
        let notice = ErrorNotice::from(&error);
        assert_eq!(notice.code, "SHEET_NOT_FOUND");
        assert_eq!(notice.detail, "Sheet not found: Q3");
    }

    #[test]
    fn test_from_serde_json_error() {
        let parse_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: NurtureError = parse_error.into();
        assert_eq!(error.error_code(), "JSON_PARSE_ERROR");
    }
}
