use super::extractors::{EducationLevel, LanguageLevel};
use serde::Serialize;

/// Attributes extracted from one hired candidate's résumé.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateProfile {
    pub candidate_id: String,
    pub candidate_name: String,
    pub job_id: String,
    pub job_title: String,
    pub application_status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience_years: Option<u64>,
    pub experience_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_level: Option<LanguageLevel>,
    pub language_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub education_level: Option<EducationLevel>,
    pub education_label: &'static str,
    pub skills: Vec<&'static str>,
}

/// Shares are percentages over the profiles where the attribute was found;
/// `None` when no profile specified it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileMetrics {
    pub hired_count: usize,
    pub mean_experience_years: Option<f32>,
    pub proficient_language_pct: Option<f32>,
    pub higher_education_pct: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelCount {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusBreakdownEntry {
    pub status: String,
    pub count: usize,
    pub hired: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct HiredProfileReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    pub metrics: ProfileMetrics,
    pub experience_distribution: Vec<LabelCount>,
    pub language_distribution: Vec<LabelCount>,
    pub education_distribution: Vec<LabelCount>,
    pub top_skills: Vec<LabelCount>,
    pub status_breakdown: Vec<StatusBreakdownEntry>,
    pub profiles: Vec<CandidateProfile>,
}
