use super::extractors::{
    experience_label, extract_experience, extract_skills, EducationLevel, LanguageLevel,
    NOT_SPECIFIED,
};
use super::hired::HiredStatusPolicy;
use super::views::{
    CandidateProfile, HiredProfileReport, LabelCount, ProfileMetrics, StatusBreakdownEntry,
};
use crate::dataset::{ApplicationRecord, Dataset};
use indexmap::IndexMap;
use std::collections::{BTreeMap, HashMap};
use tracing::{info, warn};

pub const TOP_SKILLS: usize = 15;

/// Profiles every hired application, optionally restricted to one job title.
pub fn build_hired_report(
    dataset: &Dataset,
    policy: &HiredStatusPolicy,
    job_title: Option<&str>,
) -> HiredProfileReport {
    let filtered: Vec<&ApplicationRecord> = dataset
        .records()
        .iter()
        .filter(|record| job_title.map_or(true, |title| record.job_title == title))
        .collect();

    let status_breakdown = status_breakdown(&filtered, policy);
    let profiles: Vec<CandidateProfile> = filtered
        .iter()
        .filter(|record| policy.is_hired(&record.application_status))
        .map(|record| profile(record))
        .collect();

    if profiles.is_empty() && !filtered.is_empty() {
        warn!(
            statuses = ?policy.statuses(),
            "no application matched the hired statuses"
        );
    }
    info!(
        job_title = job_title.unwrap_or("*"),
        considered = filtered.len(),
        hired = profiles.len(),
        "built hired profile report"
    );

    HiredProfileReport {
        job_title: job_title.map(str::to_string),
        metrics: metrics(&profiles),
        experience_distribution: experience_distribution(&profiles),
        language_distribution: level_distribution(
            &profiles,
            &LanguageLevel::ordered(),
            |profile| profile.language_level,
            |level| level.label(),
        ),
        education_distribution: level_distribution(
            &profiles,
            &EducationLevel::ordered(),
            |profile| profile.education_level,
            |level| level.label(),
        ),
        top_skills: top_skills(&profiles, TOP_SKILLS),
        status_breakdown,
        profiles,
    }
}

fn profile(record: &ApplicationRecord) -> CandidateProfile {
    let resume = record.resume();
    let experience_years = extract_experience(resume);
    let language_level = LanguageLevel::detect(resume);
    let education_level = EducationLevel::detect(resume);

    CandidateProfile {
        candidate_id: record.candidate_id.clone(),
        candidate_name: record.candidate_name.clone(),
        job_id: record.job_id.clone(),
        job_title: record.job_title.clone(),
        application_status: record.application_status.clone(),
        experience_years,
        experience_label: experience_label(experience_years),
        language_level,
        language_label: language_level.map_or(NOT_SPECIFIED, LanguageLevel::label),
        education_level,
        education_label: education_level.map_or(NOT_SPECIFIED, EducationLevel::label),
        skills: extract_skills(resume),
    }
}

fn metrics(profiles: &[CandidateProfile]) -> ProfileMetrics {
    let years: Vec<f64> = profiles
        .iter()
        .filter_map(|profile| profile.experience_years)
        .map(|years| years as f64)
        .collect();
    let mean_experience_years = (!years.is_empty())
        .then(|| (years.iter().sum::<f64>() / years.len() as f64) as f32);

    let languages: Vec<LanguageLevel> = profiles
        .iter()
        .filter_map(|profile| profile.language_level)
        .collect();
    let education: Vec<EducationLevel> = profiles
        .iter()
        .filter_map(|profile| profile.education_level)
        .collect();

    ProfileMetrics {
        hired_count: profiles.len(),
        mean_experience_years,
        proficient_language_pct: share(&languages, |level| level.is_proficient()),
        higher_education_pct: share(&education, |level| level.is_higher()),
    }
}

fn share<T>(values: &[T], predicate: impl Fn(&T) -> bool) -> Option<f32> {
    if values.is_empty() {
        return None;
    }
    let hits = values.iter().filter(|value| predicate(value)).count();
    Some(hits as f32 / values.len() as f32 * 100.0)
}

fn experience_distribution(profiles: &[CandidateProfile]) -> Vec<LabelCount> {
    let mut counts: BTreeMap<u64, usize> = BTreeMap::new();
    for years in profiles.iter().filter_map(|profile| profile.experience_years) {
        *counts.entry(years).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(years, count)| LabelCount {
            label: experience_label(Some(years)),
            count,
        })
        .collect()
}

/// Counts per level, most frequent first; ties keep precedence order.
fn level_distribution<L, F, N>(
    profiles: &[CandidateProfile],
    ordered: &[L],
    level_of: F,
    label: N,
) -> Vec<LabelCount>
where
    L: Copy + Eq + std::hash::Hash,
    F: Fn(&CandidateProfile) -> Option<L>,
    N: Fn(L) -> &'static str,
{
    let mut counts: HashMap<L, usize> = HashMap::new();
    for level in profiles.iter().filter_map(&level_of) {
        *counts.entry(level).or_default() += 1;
    }

    let mut distribution: Vec<LabelCount> = ordered
        .iter()
        .filter_map(|level| {
            counts.get(level).map(|count| LabelCount {
                label: label(*level).to_string(),
                count: *count,
            })
        })
        .collect();
    distribution.sort_by(|a, b| b.count.cmp(&a.count));
    distribution
}

/// Most frequent skills; ties keep the order skills were first seen.
fn top_skills(profiles: &[CandidateProfile], limit: usize) -> Vec<LabelCount> {
    let mut counts: IndexMap<&'static str, usize> = IndexMap::new();
    for skill in profiles.iter().flat_map(|profile| profile.skills.iter()) {
        *counts.entry(*skill).or_default() += 1;
    }

    let mut ranked: Vec<LabelCount> = counts
        .into_iter()
        .map(|(skill, count)| LabelCount {
            label: skill.to_string(),
            count,
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(limit);
    ranked
}

fn status_breakdown(
    records: &[&ApplicationRecord],
    policy: &HiredStatusPolicy,
) -> Vec<StatusBreakdownEntry> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in records {
        *counts.entry(record.application_status.as_str()).or_default() += 1;
    }

    let mut breakdown: Vec<StatusBreakdownEntry> = counts
        .into_iter()
        .map(|(status, count)| StatusBreakdownEntry {
            status: status.to_string(),
            count,
            hired: policy.is_hired(status),
        })
        .collect();
    breakdown.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.status.cmp(&b.status)));
    breakdown
}
