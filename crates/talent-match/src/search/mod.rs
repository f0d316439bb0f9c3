//! Candidate lookup by keywords, name or id.

mod detail;
mod query;

pub use detail::{
    highlight, keyword_occurrences, KeywordCount, ModeCounts, ResumeStats, HIGHLIGHT_MARKER,
};
pub use query::{
    parse_keywords, search_candidates, KeywordHit, SearchField, SearchHit, SearchKind, SearchQuery,
};
