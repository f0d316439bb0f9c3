use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_PROSPECTS_URL: &str =
    "https://drive.google.com/uc?id=1f_NPd0qA0iqqo9Im9FfQi78esPOlf1Bu";
pub const DEFAULT_APPLICANTS_URL: &str =
    "https://drive.google.com/uc?id=1jgiuRW402WUp-b5w1yE6nHrfR4KjFuzT";
pub const DEFAULT_JOBS_URL: &str =
    "https://drive.google.com/uc?id=1hmUUdyuAd9hoM84drSXJrQ8EbvFsPEDb";

pub const DEFAULT_HIRED_STATUSES: [&str; 3] = [
    "Contratado pela Decision",
    "Aprovado",
    "Contratado como Hunting",
];

/// Distinguishes runtime behavior for different stages of the toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub sources: SourceConfig,
    pub dataset: DatasetConfig,
    pub profiling: ProfilingConfig,
    pub embedding: EmbeddingConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let sources = SourceConfig {
            prospects_url: env_or("PROSPECTS_URL", DEFAULT_PROSPECTS_URL),
            applicants_url: env_or("APPLICANTS_URL", DEFAULT_APPLICANTS_URL),
            jobs_url: env_or("JOBS_URL", DEFAULT_JOBS_URL),
            timeout: Duration::from_secs(parse_env("HTTP_TIMEOUT_SECS", 60u64)?),
        };

        let dataset = DatasetConfig {
            snapshot_path: PathBuf::from(env_or("SNAPSHOT_PATH", "dados_processados.csv")),
            sample_cap: parse_env("SAMPLE_CAP", 5000usize)?,
            sample_seed: parse_env("SAMPLE_SEED", 42u64)?,
        };

        let hired_statuses = match env::var("HIRED_STATUSES") {
            Ok(raw) => split_statuses(&raw),
            Err(_) => DEFAULT_HIRED_STATUSES
                .iter()
                .map(|status| status.to_string())
                .collect(),
        };
        if hired_statuses.is_empty() {
            return Err(ConfigError::EmptyHiredStatuses);
        }

        let embedding = EmbeddingConfig {
            api_url: env::var("EMBEDDING_API_URL")
                .ok()
                .filter(|value| !value.trim().is_empty()),
            api_key: env::var("EMBEDDING_API_KEY")
                .ok()
                .filter(|value| !value.trim().is_empty()),
            model: env_or("EMBEDDING_MODEL", "all-MiniLM-L6-v2"),
            dimensions: parse_env("EMBEDDING_DIMENSIONS", 384usize)?,
        };
        if embedding.dimensions == 0 {
            return Err(ConfigError::InvalidNumber {
                key: "EMBEDDING_DIMENSIONS",
                value: "0".to_string(),
            });
        }

        let telemetry = TelemetryConfig {
            log_level: env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            log_file: env::var("APP_LOG_FILE")
                .ok()
                .filter(|value| !value.trim().is_empty())
                .map(PathBuf::from),
            ansi: parse_flag("APP_LOG_ANSI", false)?,
        };

        Ok(Self {
            environment,
            sources,
            dataset,
            profiling: ProfilingConfig { hired_statuses },
            embedding,
            telemetry,
        })
    }
}

/// Remote JSON sources joined into the application table.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub prospects_url: String,
    pub applicants_url: String,
    pub jobs_url: String,
    pub timeout: Duration,
}

/// Snapshot location and sampling controls.
#[derive(Debug, Clone)]
pub struct DatasetConfig {
    pub snapshot_path: PathBuf,
    /// Zero disables sampling.
    pub sample_cap: usize,
    pub sample_seed: u64,
}

#[derive(Debug, Clone)]
pub struct ProfilingConfig {
    pub hired_statuses: Vec<String>,
}

/// Selects and parameterizes the text encoder used for match scoring.
#[derive(Debug, Clone)]
pub struct EmbeddingConfig {
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    pub model: String,
    pub dimensions: usize,
}

/// Tracing controls. Logs go to stderr unless `log_file` is set, so stdout
/// only ever carries command output.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub log_file: Option<PathBuf>,
    pub ansi: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_file: None,
            ansi: false,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_env<T: std::str::FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => {
            raw.trim()
                .parse::<T>()
                .map_err(|_| ConfigError::InvalidNumber {
                    key,
                    value: raw.clone(),
                })
        }
        _ => Ok(default),
    }
}

fn parse_flag(key: &'static str, default: bool) -> Result<bool, ConfigError> {
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::InvalidFlag { key, value: raw }),
        },
        _ => Ok(default),
    }
}

fn split_statuses(raw: &str) -> Vec<String> {
    raw.split(';')
        .map(str::trim)
        .filter(|status| !status.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidNumber { key: &'static str, value: String },
    InvalidFlag { key: &'static str, value: String },
    EmptyHiredStatuses,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidNumber { key, value } => {
                write!(f, "{key} must be a positive number (got '{value}')")
            }
            ConfigError::InvalidFlag { key, value } => {
                write!(f, "{key} must be true or false (got '{value}')")
            }
            ConfigError::EmptyHiredStatuses => {
                write!(f, "HIRED_STATUSES must list at least one status")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
