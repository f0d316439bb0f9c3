use std::path::PathBuf;
use talent_match::config::DatasetConfig;
use talent_match::dataset::{Dataset, DatasetError, RawSources};
use talent_match::NOT_INFORMED;

fn fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn config(cap: usize) -> DatasetConfig {
    DatasetConfig {
        snapshot_path: PathBuf::from("unused.csv"),
        sample_cap: cap,
        sample_seed: 42,
    }
}

fn dataset() -> Dataset {
    let sources = RawSources::from_dir(fixtures()).expect("fixtures decode");
    Dataset::from_sources(&sources, &config(5000))
}

#[test]
fn fixtures_join_into_one_row_per_application() {
    let dataset = dataset();
    assert_eq!(dataset.len(), 5);

    let unnamed = dataset
        .records()
        .iter()
        .find(|record| record.candidate_id == "31002")
        .expect("unnamed applicant joined");
    assert_eq!(unnamed.candidate_name, NOT_INFORMED);
    assert_eq!(unnamed.candidate_resume, "Python e SQL");

    let numeric = dataset
        .records()
        .iter()
        .find(|record| record.candidate_id == "31003")
        .expect("numeric candidate code joined");
    assert_eq!(numeric.job_title, "Analista SAP FI");
}

#[test]
fn stats_match_the_sidebar_counts() {
    let stats = dataset().stats();
    assert_eq!(stats.total_applications, 5);
    assert_eq!(stats.named_applications, 4);
    assert_eq!(stats.distinct_jobs, 2);
    assert_eq!(stats.distinct_titles, 2);
    assert_eq!(stats.distinct_candidates, 4);
    assert_eq!(stats.status_counts.len(), 5);
}

#[test]
fn snapshot_round_trip_is_stable() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("dados_processados.csv");
    let original = dataset();

    original.write_snapshot(&path).expect("snapshot written");
    let loaded = Dataset::load_snapshot(&path).expect("snapshot loads");
    assert_eq!(loaded.records(), original.records());

    let recleaned = Dataset::new(loaded.records().to_vec());
    let twice = Dataset::new(recleaned.records().to_vec());
    assert_eq!(recleaned.records(), twice.records());
}

#[test]
fn sampling_cap_is_applied_during_assembly() {
    let sources = RawSources::from_dir(fixtures()).expect("fixtures decode");
    let capped = Dataset::from_sources(&sources, &config(3));
    assert_eq!(capped.len(), 3);
    let again = Dataset::from_sources(&sources, &config(3));
    assert_eq!(capped.records(), again.records());
}

#[test]
fn missing_source_file_is_reported_with_its_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    match RawSources::from_dir(dir.path()) {
        Err(DatasetError::Io { path, .. }) => assert!(path.ends_with("prospects.json")),
        other => panic!("expected io error, got {other:?}"),
    }
}
