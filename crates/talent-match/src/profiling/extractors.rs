use crate::dataset::NOT_INFORMED;
use regex::Regex;
use serde::Serialize;
use std::num::IntErrorKind;
use std::sync::OnceLock;

/// Label used when an extractor finds nothing.
pub const NOT_SPECIFIED: &str = "Não especificado";

const EXPERIENCE_PATTERNS: [&str; 6] = [
    r"(\d+)\s*anos?\s*(?:de\s*)?experiência",
    r"experiência\s*de\s*(\d+)\s*anos?",
    r"(\d+)\s*anos?\s*(?:de\s*)?exp",
    r"exp\s*de\s*(\d+)\s*anos?",
    r"(\d+)\s*anos?\s*na\s*área",
    r"(\d+)\s*anos?\s*em\s*[a-záéíóúâêîôûãõç\s]+",
];

fn experience_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        EXPERIENCE_PATTERNS
            .iter()
            .filter_map(|pattern| Regex::new(pattern).ok())
            .collect()
    })
}

/// Lowercased résumé text, or `None` when there is nothing to read.
fn readable(text: Option<&str>) -> Option<String> {
    text.filter(|text| *text != NOT_INFORMED && !text.trim().is_empty())
        .map(str::to_lowercase)
}

/// Years of experience claimed in a résumé.
///
/// Patterns are tried in order; the first one with any hit decides, and the
/// largest number among its hits is returned. Counts too large for `u64`
/// saturate.
pub fn extract_experience(text: Option<&str>) -> Option<u64> {
    let text = readable(text)?;
    experience_patterns().iter().find_map(|pattern| {
        pattern
            .captures_iter(&text)
            .filter_map(|captures| parse_years(captures.get(1)?.as_str()))
            .max()
    })
}

fn parse_years(digits: &str) -> Option<u64> {
    match digits.parse::<u64>() {
        Ok(years) => Some(years),
        Err(err) if *err.kind() == IntErrorKind::PosOverflow => Some(u64::MAX),
        Err(_) => None,
    }
}

pub fn experience_label(years: Option<u64>) -> String {
    match years {
        Some(years) => format!("{years} anos"),
        None => NOT_SPECIFIED.to_string(),
    }
}

/// Returns the label of the first bucket with a keyword contained in `text`.
fn first_bucket<L: Copy>(text: &str, buckets: &[(L, &[&str])]) -> Option<L> {
    buckets
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| text.contains(keyword)))
        .map(|(label, _)| *label)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LanguageLevel {
    Advanced,
    Intermediate,
    Basic,
    Native,
}

impl LanguageLevel {
    const BUCKETS: [(LanguageLevel, &'static [&'static str]); 4] = [
        (
            LanguageLevel::Advanced,
            &["avançado", "advanced", "fluente", "fluent", "c2", "c1"],
        ),
        (
            LanguageLevel::Intermediate,
            &["intermediário", "intermediate", "b2", "b1", "intermediario"],
        ),
        (
            LanguageLevel::Basic,
            &["básico", "basic", "iniciante", "beginner", "a2", "a1", "basico"],
        ),
        (LanguageLevel::Native, &["nativo", "native"]),
    ];

    pub fn ordered() -> [LanguageLevel; 4] {
        Self::BUCKETS.map(|(level, _)| level)
    }

    pub fn detect(text: Option<&str>) -> Option<Self> {
        first_bucket(&readable(text)?, &Self::BUCKETS)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Advanced => "Avançado",
            Self::Intermediate => "Intermediário",
            Self::Basic => "Básico",
            Self::Native => "Nativo",
        }
    }

    pub const fn is_proficient(self) -> bool {
        matches!(self, Self::Advanced | Self::Native)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EducationLevel {
    Doctorate,
    Masters,
    Postgraduate,
    Undergraduate,
    Technical,
    HighSchool,
}

impl EducationLevel {
    const BUCKETS: [(EducationLevel, &'static [&'static str]); 6] = [
        (EducationLevel::Doctorate, &["doutorado", "phd", "doutor"]),
        (EducationLevel::Masters, &["mestrado", "mestre"]),
        (
            EducationLevel::Postgraduate,
            &["pós-graduação", "pos-graduacao", "especialização", "especializacao"],
        ),
        (
            EducationLevel::Undergraduate,
            &[
                "graduação",
                "graduacao",
                "bacharelado",
                "licenciatura",
                "tecnólogo",
                "tecnologo",
            ],
        ),
        (
            EducationLevel::Technical,
            &["técnico", "tecnico", "curso técnico"],
        ),
        (EducationLevel::HighSchool, &["ensino médio", "ensino medio"]),
    ];

    pub fn ordered() -> [EducationLevel; 6] {
        Self::BUCKETS.map(|(level, _)| level)
    }

    pub fn detect(text: Option<&str>) -> Option<Self> {
        first_bucket(&readable(text)?, &Self::BUCKETS)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Doctorate => "Doutorado",
            Self::Masters => "Mestrado",
            Self::Postgraduate => "Pós-graduação",
            Self::Undergraduate => "Graduação",
            Self::Technical => "Técnico",
            Self::HighSchool => "Ensino médio",
        }
    }

    pub const fn is_higher(self) -> bool {
        matches!(
            self,
            Self::Doctorate | Self::Masters | Self::Postgraduate | Self::Undergraduate
        )
    }
}

pub const SKILL_VOCABULARY: [&str; 44] = [
    "python",
    "java",
    "javascript",
    "sql",
    "html",
    "css",
    "react",
    "angular",
    "vue",
    "node.js",
    "docker",
    "kubernetes",
    "aws",
    "azure",
    "gcp",
    "git",
    "jenkins",
    "machine learning",
    "ai",
    "data science",
    "big data",
    "tableau",
    "power bi",
    "excel",
    "word",
    "powerpoint",
    "project management",
    "scrum",
    "agile",
    "linux",
    "windows",
    "macos",
    "oracle",
    "mysql",
    "postgresql",
    "mongodb",
    "php",
    "c#",
    "c++",
    "ruby",
    "go",
    "rust",
    "swift",
    "kotlin",
];

/// Vocabulary skills occurring anywhere in the résumé, in vocabulary order.
pub fn extract_skills(text: Option<&str>) -> Vec<&'static str> {
    let Some(text) = readable(text) else {
        return Vec::new();
    };
    SKILL_VOCABULARY
        .iter()
        .copied()
        .filter(|skill| text.contains(skill))
        .collect()
}
