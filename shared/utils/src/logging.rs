use anyhow::Result;
use std::fs::{File, OpenOptions};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::LoggingConfig;

/// Crates whose events follow the configured level. Everything else
/// (spreadsheet, zip and csv internals) is held at `warn`.
pub const INGEST_TARGETS: &[&str] = &["mailpulse_utils", "mailpulse_models"];

/// Filter directives for a configured level, e.g. `warn,mailpulse_utils=debug,...`.
///
/// A level that already contains directives (`info,calamine=debug`) is used
/// verbatim.
pub fn filter_directives(level: &str) -> String {
    let level = level.trim();
    if level.contains('=') || level.contains(',') {
        return level.to_string();
    }

    let mut directives = String::from("warn");
    for target in INGEST_TARGETS {
        directives.push_str(&format!(",{}={}", target, level));
    }
    directives
}

pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter_directives(&config.level)))
        .unwrap_or_else(|_| EnvFilter::new(filter_directives("info")));

    let registry = tracing_subscriber::registry().with(env_filter);
    let log_file = config.file_path.as_deref().map(open_log_file).transpose()?;

    match (config.format.as_str(), log_file) {
        ("json", Some(file)) => registry
            .with(fmt::layer().json().with_span_events(FmtSpan::CLOSE).with_writer(file))
            .try_init()?,
        ("json", None) => registry
            .with(fmt::layer().json().with_span_events(FmtSpan::CLOSE))
            .try_init()?,
        (_, Some(file)) => registry
            .with(fmt::layer().with_ansi(false).with_writer(file))
            .try_init()?,
        (_, None) => registry.with(fmt::layer()).try_init()?,
    }

    tracing::info!(
        level = %config.level,
        format = %config.format,
        file = ?config.file_path,
        "Ingest logging initialized"
    );
    Ok(())
}

fn open_log_file(path: &str) -> std::io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directives_scope_level_to_ingest_crates() {
        assert_eq!(
            filter_directives("debug"),
            "warn,mailpulse_utils=debug,mailpulse_models=debug"
        );
        assert_eq!(filter_directives(" info,calamine=trace "), "info,calamine=trace");
        assert!(EnvFilter::try_new(filter_directives("trace")).is_ok());
    }

    #[test]
    fn test_second_init_reports_error() {
        let config = LoggingConfig {
            level: "debug".to_string(),
            format: "json".to_string(),
            file_path: None,
        };

        // Only one global subscriber can be installed per process.
        let _ = init_logging(&config);
        assert!(init_logging(&config).is_err());
    }
}
