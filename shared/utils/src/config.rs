use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;
use validator::Validate;

use crate::error::NurtureResult;
use crate::validation::validate_model;

/// Extensions accepted by the upload intake, lowercase and without the dot.
pub const SUPPORTED_EXTENSIONS: [&str; 5] = ["csv", "xls", "xlsx", "xlsm", "json"];

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AppConfig {
    #[validate]
    pub ingest: IngestConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct IngestConfig {
    #[validate(range(min = 1))]
    pub max_file_size_bytes: u64,
    #[validate(length(min = 1))]
    pub allowed_extensions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub file_path: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        let config = Config::builder()
            .set_default(
                "ingest.max_file_size_bytes",
                defaults.ingest.max_file_size_bytes as i64,
            )?
            .set_default("ingest.allowed_extensions", defaults.ingest.allowed_extensions)?
            .set_default("logging.level", defaults.logging.level)?
            .set_default("logging.format", defaults.logging.format)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(
                File::with_name(&format!(
                    "config/{}",
                    env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into())
                ))
                .required(false),
            )
            // Local overrides (gitignored)
            .add_source(File::with_name("config/local").required(false))
            .add_source(
                Environment::with_prefix("MAILPULSE")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("ingest.allowed_extensions")
                    .try_parsing(true),
            );

        config.build()?.try_deserialize()
    }

    /// Loads the configuration and checks it against the validation rules.
    pub fn load_validated() -> NurtureResult<Self> {
        let config = Self::load()?;
        validate_model(&config)?;
        Ok(config)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ingest: IngestConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "pretty".to_string(),
                file_path: None,
            },
        }
    }
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            max_file_size_bytes: 16 * 1024 * 1024, // 16MB
            allowed_extensions: SUPPORTED_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }
}

impl IngestConfig {
    pub fn allowed_extensions(&self) -> Vec<&str> {
        self.allowed_extensions.iter().map(String::as_str).collect()
    }
}
