use super::sources::{RawSources, SourceKind};
use super::DatasetError;
use crate::config::SourceConfig;
use reqwest::Client;
use std::time::Duration;
use tokio::runtime::Runtime;
use tracing::{error, info};

/// Downloads the three source documents over HTTP GET.
///
/// Wraps an async `reqwest` client in a private runtime so the dataset
/// loader stays synchronous for its callers.
pub struct SourceFetcher {
    client: Client,
    runtime: Runtime,
}

impl std::fmt::Debug for SourceFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceFetcher").finish_non_exhaustive()
    }
}

impl SourceFetcher {
    pub fn new(timeout: Duration) -> Result<Self, DatasetError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(DatasetError::Client)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(DatasetError::Runtime)?;

        Ok(Self { client, runtime })
    }

    /// Fetches every source, aborting on the first failure so a join never
    /// runs against a partial download.
    pub fn download(&self, config: &SourceConfig) -> Result<RawSources, DatasetError> {
        let prospects = self.fetch(SourceKind::Prospects, &config.prospects_url)?;
        let applicants = self.fetch(SourceKind::Applicants, &config.applicants_url)?;
        let jobs = self.fetch(SourceKind::Jobs, &config.jobs_url)?;

        let sources = RawSources::from_slices(&prospects, &applicants, &jobs)?;
        info!(
            jobs_with_prospects = sources.prospects.len(),
            applicants = sources.applicants.len(),
            jobs = sources.jobs.len(),
            "source documents decoded"
        );
        Ok(sources)
    }

    fn fetch(&self, kind: SourceKind, url: &str) -> Result<Vec<u8>, DatasetError> {
        info!(source_name = kind.label(), url, "downloading source document");

        let result = self.runtime.block_on(async {
            let response = self.client.get(url).send().await?.error_for_status()?;
            let body = response.bytes().await?;
            Ok::<_, reqwest::Error>(body.to_vec())
        });

        result.map_err(|source| {
            error!(source_name = kind.label(), url, error = %source, "download failed");
            DatasetError::Download {
                source_name: kind.label(),
                url: url.to_string(),
                source,
            }
        })
    }
}
