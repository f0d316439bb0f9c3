use super::record::ApplicationRecord;
use super::DatasetError;
use serde::{Deserialize, Deserializer};
use std::fs::File;
use std::io::{ErrorKind, Read, Write};
use std::path::Path;
use tracing::info;

/// Persists the cleaned table as CSV with a header row.
pub fn write_snapshot<P: AsRef<Path>>(
    path: P,
    records: &[ApplicationRecord],
) -> Result<(), DatasetError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_records(file, records)?;
    info!(path = %path.display(), records = records.len(), "snapshot written");
    Ok(())
}

/// Loads a snapshot, re-applying sentinel cleaning to every row.
pub fn read_snapshot<P: AsRef<Path>>(path: P) -> Result<Vec<ApplicationRecord>, DatasetError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => DatasetError::SnapshotMissing {
            path: path.to_path_buf(),
        },
        _ => DatasetError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;
    let records = read_records(file)?;
    info!(path = %path.display(), records = records.len(), "snapshot loaded");
    Ok(records)
}

pub(crate) fn write_records<W: Write>(
    writer: W,
    records: &[ApplicationRecord],
) -> Result<(), DatasetError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

pub(crate) fn read_records<R: Read>(reader: R) -> Result<Vec<ApplicationRecord>, DatasetError> {
    let mut csv_reader = csv::ReaderBuilder::new().from_reader(reader);
    let mut records = Vec::new();

    for row in csv_reader.deserialize::<SnapshotRow>() {
        records.push(row?.into_record());
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct SnapshotRow {
    candidate_id: String,
    job_id: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    application_status: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    candidate_name: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    candidate_resume: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    job_title: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    job_requirements: Option<String>,
}

impl SnapshotRow {
    fn into_record(self) -> ApplicationRecord {
        ApplicationRecord::from_parts(
            self.candidate_id,
            self.job_id,
            self.application_status,
            self.candidate_name,
            self.candidate_resume,
            self.job_title,
            self.job_requirements,
        )
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|text| !text.is_empty()))
}
