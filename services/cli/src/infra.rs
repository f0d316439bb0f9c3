use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use talent_match::config::AppConfig;
use talent_match::dataset::{Dataset, RawSources, SourceFetcher};
use talent_match::error::AppError;
use talent_match::matching::{build_encoder, CompatibilityScorer};
use talent_match::profiling::HiredStatusPolicy;
use tracing::info;

/// Where the application table comes from for this invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DataSource {
    Snapshot,
    Download,
    LocalDir(PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub(crate) fn from_flag(json: bool) -> Self {
        if json {
            Self::Json
        } else {
            Self::Text
        }
    }
}

/// Everything a view needs, built once per invocation and shared read-only.
#[derive(Debug, Clone)]
pub(crate) struct AppContext {
    pub(crate) config: AppConfig,
    pub(crate) dataset: Arc<Dataset>,
    pub(crate) scorer: CompatibilityScorer,
    pub(crate) hired_policy: HiredStatusPolicy,
}

impl AppContext {
    pub(crate) fn load(config: AppConfig, source: DataSource) -> Result<Self, AppError> {
        let dataset = load_dataset(&config, &source)?;
        Self::with_dataset(config, dataset)
    }

    pub(crate) fn with_dataset(config: AppConfig, dataset: Dataset) -> Result<Self, AppError> {
        let encoder = build_encoder(&config.embedding, config.sources.timeout)?;
        let hired_policy = HiredStatusPolicy::new(&config.profiling.hired_statuses);
        Ok(Self {
            dataset: Arc::new(dataset),
            scorer: CompatibilityScorer::new(encoder),
            hired_policy,
            config,
        })
    }
}

pub(crate) fn load_dataset(config: &AppConfig, source: &DataSource) -> Result<Dataset, AppError> {
    let dataset = match source {
        DataSource::Snapshot => Dataset::load_snapshot(&config.dataset.snapshot_path)?,
        DataSource::Download => {
            let fetcher = SourceFetcher::new(config.sources.timeout)?;
            let sources = fetcher.download(&config.sources)?;
            Dataset::from_sources(&sources, &config.dataset)
        }
        DataSource::LocalDir(dir) => {
            info!(dir = %dir.display(), "reading sources from local directory");
            let sources = RawSources::from_dir(dir)?;
            Dataset::from_sources(&sources, &config.dataset)
        }
    };
    info!(records = dataset.len(), source = ?source, "dataset ready");
    Ok(dataset)
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    serde_json::to_writer_pretty(&mut handle, value)?;
    writeln!(handle)?;
    Ok(())
}

pub(crate) fn parse_page(raw: &str) -> Result<usize, String> {
    match raw.trim().parse::<usize>() {
        Ok(0) => Err("page numbers start at 1".to_string()),
        Ok(value) => Ok(value),
        Err(err) => Err(format!("failed to parse '{raw}' as a page number ({err})")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_parser_rejects_zero_and_garbage() {
        assert_eq!(parse_page(" 3 "), Ok(3));
        assert!(parse_page("0").is_err());
        assert!(parse_page("dois").is_err());
    }
}
