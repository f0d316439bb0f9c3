//! Loading, joining and persisting the application table.

mod fetch;
mod join;
mod record;
mod sample;
mod snapshot;
mod sources;
mod store;

pub use fetch::SourceFetcher;
pub use join::join_sources;
pub use record::{informed, ApplicationRecord, NOT_INFORMED};
pub use sample::downsample;
pub use snapshot::{read_snapshot, write_snapshot};
pub use sources::{Applicant, JobPosting, Prospect, ProspectGroup, RawSources, SourceKind};
pub use store::{Dataset, DatasetStats};

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to download {source_name} from {url}: {source}")]
    Download {
        source_name: &'static str,
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("http client unavailable: {0}")]
    Client(#[source] reqwest::Error),
    #[error("download runtime unavailable: {0}")]
    Runtime(#[source] std::io::Error),
    #[error("{source_name} document is not valid JSON: {source}")]
    Decode {
        source_name: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("snapshot {} not found; run `talent-match preprocess` first", path.display())]
    SnapshotMissing { path: PathBuf },
    #[error("unable to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("snapshot csv error: {0}")]
    Csv(#[from] csv::Error),
}
