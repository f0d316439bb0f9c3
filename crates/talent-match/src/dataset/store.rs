use super::join::join_sources;
use super::record::ApplicationRecord;
use super::sample::downsample;
use super::snapshot;
use super::sources::RawSources;
use super::DatasetError;
use crate::config::DatasetConfig;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::Path;
use tracing::info;

/// The cleaned application table every view reads from.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<ApplicationRecord>,
}

impl Dataset {
    pub fn new(records: Vec<ApplicationRecord>) -> Self {
        Self {
            records: records.into_iter().map(ApplicationRecord::cleaned).collect(),
        }
    }

    /// Joins the decoded sources, then applies the configured sample cap.
    pub fn from_sources(sources: &RawSources, config: &DatasetConfig) -> Self {
        let joined = join_sources(sources);
        let sampled = downsample(joined, config.sample_cap, config.sample_seed);
        info!(records = sampled.len(), "dataset assembled from sources");
        Self::new(sampled)
    }

    pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<Self, DatasetError> {
        Ok(Self::new(snapshot::read_snapshot(path)?))
    }

    pub fn write_snapshot<P: AsRef<Path>>(&self, path: P) -> Result<(), DatasetError> {
        snapshot::write_snapshot(path, &self.records)
    }

    pub fn records(&self) -> &[ApplicationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records with an informed candidate name; the population every
    /// analysis view works on.
    pub fn named(&self) -> impl Iterator<Item = &ApplicationRecord> {
        self.records.iter().filter(|record| record.has_name())
    }

    pub fn stats(&self) -> DatasetStats {
        let mut jobs = HashSet::new();
        let mut titles = HashSet::new();
        let mut candidates = HashSet::new();
        let mut statuses: HashMap<&str, usize> = HashMap::new();

        for record in &self.records {
            jobs.insert(record.job_id.as_str());
            candidates.insert(record.candidate_id.as_str());
            if let Some(title) = record.title() {
                titles.insert(title);
            }
            *statuses.entry(record.application_status.as_str()).or_default() += 1;
        }

        let mut status_counts: Vec<StatusCount> = statuses
            .into_iter()
            .map(|(status, count)| StatusCount {
                status: status.to_string(),
                count,
            })
            .collect();
        status_counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.status.cmp(&b.status)));

        DatasetStats {
            total_applications: self.records.len(),
            named_applications: self.named().count(),
            distinct_jobs: jobs.len(),
            distinct_titles: titles.len(),
            distinct_candidates: candidates.len(),
            status_counts,
        }
    }

    /// Sorted distinct informed titles among named records.
    pub fn job_titles(&self) -> Vec<String> {
        self.named()
            .filter_map(ApplicationRecord::title)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Sorted distinct job ids among named records.
    pub fn job_ids(&self) -> Vec<String> {
        self.named()
            .map(|record| record.job_id.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetStats {
    pub total_applications: usize,
    pub named_applications: usize,
    pub distinct_jobs: usize,
    pub distinct_titles: usize,
    pub distinct_candidates: usize,
    pub status_counts: Vec<StatusCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: String,
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::record::NOT_INFORMED;

    fn record(
        candidate: &str,
        job: &str,
        status: &str,
        name: &str,
        title: &str,
    ) -> ApplicationRecord {
        let some = |value: &str| (!value.is_empty()).then(|| value.to_string());
        ApplicationRecord::from_parts(
            candidate.to_string(),
            job.to_string(),
            some(status),
            some(name),
            None,
            some(title),
            None,
        )
    }

    fn dataset() -> Dataset {
        Dataset::new(vec![
            record("1", "10", "Prospect", "Ana", "Dev Java"),
            record("2", "10", "Prospect", "", "Dev Java"),
            record("1", "11", "Aprovado", "Ana", "Analista SAP"),
            record("3", "12", "", "Caio", ""),
        ])
    }

    #[test]
    fn stats_summarize_the_table() {
        let stats = dataset().stats();
        assert_eq!(stats.total_applications, 4);
        assert_eq!(stats.named_applications, 3);
        assert_eq!(stats.distinct_jobs, 3);
        assert_eq!(stats.distinct_titles, 2);
        assert_eq!(stats.distinct_candidates, 3);
        let counts: Vec<(&str, usize)> = stats
            .status_counts
            .iter()
            .map(|entry| (entry.status.as_str(), entry.count))
            .collect();
        assert_eq!(
            counts,
            vec![("Prospect", 2), ("Aprovado", 1), (NOT_INFORMED, 1)]
        );
    }

    #[test]
    fn job_choices_come_from_named_records() {
        let dataset = dataset();
        assert_eq!(dataset.job_titles(), vec!["Analista SAP", "Dev Java"]);
        assert_eq!(dataset.job_ids(), vec!["10", "11", "12"]);
    }

    #[test]
    fn sources_are_joined_and_capped() {
        let sources = RawSources::from_slices(
            br#"{"10": {"prospects": [
                {"codigo": "1"}, {"codigo": "2"}, {"codigo": "3"}, {"codigo": "4"}
            ]}}"#,
            b"{}",
            b"{}",
        )
        .expect("fixture decodes");
        let config = DatasetConfig {
            snapshot_path: "unused.csv".into(),
            sample_cap: 2,
            sample_seed: 42,
        };
        let dataset = Dataset::from_sources(&sources, &config);
        assert_eq!(dataset.len(), 2);
        assert!(dataset.records().iter().all(|record| record.job_id == "10"));
    }
}
