use std::path::PathBuf;
use std::sync::Arc;
use talent_match::config::{DatasetConfig, DEFAULT_HIRED_STATUSES};
use talent_match::dataset::{Dataset, RawSources};
use talent_match::matching::{
    paginate, rank_candidates, CompatibilityScorer, HashingEncoder, JobSelector,
};
use talent_match::profiling::{build_hired_report, HiredStatusPolicy, LanguageLevel};
use talent_match::search::{highlight, search_candidates, ModeCounts, SearchKind, SearchQuery};

fn dataset() -> Dataset {
    let fixtures = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
    let sources = RawSources::from_dir(fixtures).expect("fixtures decode");
    Dataset::from_sources(
        &sources,
        &DatasetConfig {
            snapshot_path: PathBuf::from("unused.csv"),
            sample_cap: 0,
            sample_seed: 42,
        },
    )
}

fn scorer() -> CompatibilityScorer {
    CompatibilityScorer::new(Arc::new(HashingEncoder::new(384)))
}

#[test]
fn data_engineer_ranking_prefers_the_matching_resume() {
    let dataset = dataset();
    let report = rank_candidates(
        &dataset,
        &JobSelector::Title("Engenheiro de Dados".to_string()),
        &scorer(),
    )
    .expect("ranking succeeds");

    assert_eq!(report.candidate_count, 2);
    assert_eq!(report.entries[0].candidate_name, "Ana Souza");
    assert!(report.entries[0].score >= report.entries[1].score);
    assert!(report.mean_score <= report.max_score);
    assert!(report
        .entries
        .iter()
        .all(|entry| (0.0..=1.0).contains(&entry.score)));

    let page = paginate(&report.entries, 1, 10);
    assert_eq!(page.total_pages, 1);
    assert_eq!(page.items.len(), 2);
}

#[test]
fn keyword_search_requires_every_keyword() {
    let dataset = dataset();
    let query = SearchQuery::new(Some("python, java"), None, None);
    let hits = search_candidates(dataset.records(), &query);
    let ids: Vec<&str> = hits.iter().map(|hit| hit.record.candidate_id.as_str()).collect();
    assert_eq!(ids, vec!["31001"]);

    let text = highlight(&hits[0].record.candidate_resume, &query.keywords);
    assert!(text.contains("🎯**Java**"));
    assert!(text.contains("🎯**Python**"));
}

#[test]
fn mixed_search_counts_each_mode() {
    let dataset = dataset();
    let query = SearchQuery::new(Some("sap"), Some("ana"), Some("31002"));
    let hits = search_candidates(dataset.records(), &query);
    let counts = ModeCounts::of(&hits);
    assert_eq!(counts.keyword, 1);
    assert_eq!(counts.name, 1);
    assert_eq!(counts.id, 1);
    assert_eq!(hits[0].kind, SearchKind::Keyword);
    assert_eq!(hits[0].record.candidate_id, "31003");
}

#[test]
fn hired_report_profiles_hired_candidates() {
    let dataset = dataset();
    let policy = HiredStatusPolicy::new(DEFAULT_HIRED_STATUSES);
    let report = build_hired_report(&dataset, &policy, None);

    assert_eq!(report.metrics.hired_count, 2);
    assert_eq!(report.metrics.mean_experience_years, Some(7.0));

    let ana = report
        .profiles
        .iter()
        .find(|profile| profile.candidate_id == "31000")
        .expect("ana profiled");
    assert_eq!(ana.experience_label, "6 anos");
    assert_eq!(ana.language_level, Some(LanguageLevel::Advanced));
    assert_eq!(ana.education_label, "Mestrado");
    assert!(ana.skills.contains(&"python"));
    assert!(ana.skills.contains(&"sql"));

    let carla = report
        .profiles
        .iter()
        .find(|profile| profile.candidate_id == "31003")
        .expect("carla profiled");
    assert_eq!(carla.experience_label, "8 anos");
    assert_eq!(carla.language_label, "Avançado");
    assert_eq!(carla.education_label, "Graduação");
}
