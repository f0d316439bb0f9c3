use crate::config::TelemetryConfig;
use std::fmt;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
pub enum TelemetryError {
    EnvFilter { value: String, source: ParseError },
    LogFile { path: PathBuf, source: std::io::Error },
    Subscriber(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::EnvFilter { value, .. } => {
                write!(f, "invalid log filter '{value}'")
            }
            TelemetryError::LogFile { path, source } => {
                write!(f, "cannot open log file {}: {source}", path.display())
            }
            TelemetryError::Subscriber(err) => write!(f, "subscriber already installed: {err}"),
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::EnvFilter { source, .. } => Some(source),
            TelemetryError::LogFile { source, .. } => Some(source),
            TelemetryError::Subscriber(err) => Some(&**err),
        }
    }
}

/// `RUST_LOG` wins over the configured level.
fn env_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(&config.log_level).map_err(|source| TelemetryError::EnvFilter {
        value: config.log_level.clone(),
        source,
    })
}

/// Appends to the configured log file, or falls back to stderr.
fn log_writer(config: &TelemetryConfig) -> Result<BoxMakeWriter, TelemetryError> {
    match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|source| TelemetryError::LogFile {
                    path: path.clone(),
                    source,
                })?;
            Ok(BoxMakeWriter::new(Mutex::new(file)))
        }
        None => Ok(BoxMakeWriter::new(std::io::stderr)),
    }
}

pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = env_filter(config)?;
    let writer = log_writer(config)?;
    // A log file never gets color codes.
    let ansi = config.ansi && config.log_file.is_none();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_target(false)
        .with_ansi(ansi)
        .compact()
        .try_init()
        .map_err(TelemetryError::Subscriber)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_filter_reports_offending_value() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        let config = TelemetryConfig {
            log_level: "talent_match=notalevel".to_string(),
            ..TelemetryConfig::default()
        };
        match init(&config) {
            Err(TelemetryError::EnvFilter { value, .. }) => {
                assert_eq!(value, "talent_match=notalevel");
            }
            other => panic!("expected env filter error, got {other:?}"),
        }
    }

    #[test]
    fn unwritable_log_file_is_reported() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("missing").join("talent-match.log");
        let config = TelemetryConfig {
            log_file: Some(path.clone()),
            ..TelemetryConfig::default()
        };
        match log_writer(&config) {
            Err(TelemetryError::LogFile { path: reported, .. }) => assert_eq!(reported, path),
            Err(other) => panic!("expected log file error, got {other:?}"),
            Ok(_) => panic!("log file in a missing directory should not open"),
        }
    }

    #[test]
    fn log_file_is_created_on_demand() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("talent-match.log");
        let config = TelemetryConfig {
            log_file: Some(path.clone()),
            ..TelemetryConfig::default()
        };
        assert!(log_writer(&config).is_ok());
        assert!(path.exists());
    }
}
