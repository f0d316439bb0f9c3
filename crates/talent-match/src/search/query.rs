use crate::dataset::{informed, ApplicationRecord};
use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

/// Splits a comma-separated keyword list, trimming entries and dropping
/// blanks.
pub fn parse_keywords(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|keyword| !keyword.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub keywords: Vec<String>,
    pub name: Option<String>,
    pub candidate_id: Option<String>,
}

impl SearchQuery {
    pub fn new(keywords: Option<&str>, name: Option<&str>, candidate_id: Option<&str>) -> Self {
        let trimmed = |value: Option<&str>| {
            value
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };
        Self {
            keywords: keywords.map(parse_keywords).unwrap_or_default(),
            name: trimmed(name),
            candidate_id: trimmed(candidate_id),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty() && self.name.is_none() && self.candidate_id.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchKind {
    Keyword,
    Name,
    Id,
}

impl SearchKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Keyword => "Por Habilidades",
            Self::Name => "Por Nome",
            Self::Id => "Por ID",
        }
    }
}

/// Candidate fields a keyword can be found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchField {
    Resume,
    Name,
    Status,
}

impl SearchField {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Resume => "CV do Candidato",
            Self::Name => "Nome do Candidato",
            Self::Status => "Situação da Candidatura",
        }
    }

    fn value(self, record: &ApplicationRecord) -> &str {
        match self {
            Self::Resume => &record.candidate_resume,
            Self::Name => &record.candidate_name,
            Self::Status => &record.application_status,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordHit {
    pub keyword: String,
    pub fields: Vec<SearchField>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    pub kind: SearchKind,
    /// Distinct keywords matched; 1 for name and id hits.
    pub matches: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub found_in: Vec<KeywordHit>,
    pub record: ApplicationRecord,
}

/// Runs every mode present in the query and merges the results.
///
/// Keyword hits come first, then name hits, then id hits; each candidate
/// appears once (its first hit wins), and the list is stably ordered by
/// keyword-ness then matched keyword count.
pub fn search_candidates(records: &[ApplicationRecord], query: &SearchQuery) -> Vec<SearchHit> {
    if query.is_empty() {
        return Vec::new();
    }

    let mut hits = Vec::new();
    if !query.keywords.is_empty() {
        hits.extend(by_keywords(records, &query.keywords));
    }
    if let Some(name) = &query.name {
        hits.extend(by_name(records, name));
    }
    if let Some(candidate_id) = &query.candidate_id {
        hits.extend(by_id(records, candidate_id));
    }

    let mut seen = HashSet::new();
    hits.retain(|hit| seen.insert(hit.record.candidate_id.clone()));
    hits.sort_by(|a, b| {
        let key = |hit: &SearchHit| (hit.kind == SearchKind::Keyword, hit.matches);
        key(b).cmp(&key(a))
    });

    debug!(hits = hits.len(), "candidate search finished");
    hits
}

fn by_keywords(records: &[ApplicationRecord], keywords: &[String]) -> Vec<SearchHit> {
    let lowered: Vec<String> = keywords.iter().map(|keyword| keyword.to_lowercase()).collect();
    let fields = [SearchField::Resume, SearchField::Name, SearchField::Status];

    records
        .iter()
        .filter_map(|record| {
            let haystacks: Vec<(SearchField, String)> = fields
                .iter()
                .filter_map(|field| {
                    informed(field.value(record)).map(|value| (*field, value.to_lowercase()))
                })
                .collect();

            let found_in: Vec<KeywordHit> = keywords
                .iter()
                .zip(&lowered)
                .map(|(keyword, needle)| KeywordHit {
                    keyword: keyword.clone(),
                    fields: haystacks
                        .iter()
                        .filter(|(_, haystack)| haystack.contains(needle.as_str()))
                        .map(|(field, _)| *field)
                        .collect(),
                })
                .collect();

            found_in
                .iter()
                .all(|hit| !hit.fields.is_empty())
                .then(|| SearchHit {
                    kind: SearchKind::Keyword,
                    matches: found_in.len(),
                    found_in,
                    record: record.clone(),
                })
        })
        .collect()
}

fn by_name(records: &[ApplicationRecord], name: &str) -> Vec<SearchHit> {
    let needle = name.to_lowercase();
    records
        .iter()
        .filter(|record| {
            record
                .name()
                .is_some_and(|candidate| candidate.to_lowercase().contains(&needle))
        })
        .map(|record| SearchHit {
            kind: SearchKind::Name,
            matches: 1,
            found_in: Vec::new(),
            record: record.clone(),
        })
        .collect()
}

fn by_id(records: &[ApplicationRecord], candidate_id: &str) -> Vec<SearchHit> {
    records
        .iter()
        .filter(|record| record.candidate_id == candidate_id)
        .map(|record| SearchHit {
            kind: SearchKind::Id,
            matches: 1,
            found_in: Vec::new(),
            record: record.clone(),
        })
        .collect()
}
