//! Résumé attribute extraction and the hired-candidate profile report.

mod extractors;
mod hired;
mod report;
mod views;

pub use extractors::{
    experience_label, extract_experience, extract_skills, EducationLevel, LanguageLevel,
    NOT_SPECIFIED, SKILL_VOCABULARY,
};
pub use hired::HiredStatusPolicy;
pub use report::{build_hired_report, TOP_SKILLS};
pub use views::{
    CandidateProfile, HiredProfileReport, LabelCount, ProfileMetrics, StatusBreakdownEntry,
};
