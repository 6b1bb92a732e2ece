pub mod config;
pub mod logging;
pub mod error;
pub mod validation;
pub mod ingest;

pub use self::config::*;
pub use logging::*;
pub use error::*;
pub use validation::*;
pub use ingest::{
    load_upload, parse_file, parse_upload, sheet_names, FileFormat, UploadOutcome, UploadedFile,
};
