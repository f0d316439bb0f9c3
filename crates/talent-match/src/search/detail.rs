use super::query::{SearchHit, SearchKind};
use regex::RegexBuilder;
use serde::Serialize;

pub const HIGHLIGHT_MARKER: &str = "🎯";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordCount {
    pub keyword: String,
    pub count: usize,
}

/// Case-insensitive, non-overlapping occurrence counts, most frequent first.
pub fn keyword_occurrences(text: &str, keywords: &[String]) -> Vec<KeywordCount> {
    let haystack = text.to_lowercase();
    let mut counts: Vec<KeywordCount> = keywords
        .iter()
        .map(|keyword| {
            let needle = keyword.to_lowercase();
            let count = if needle.is_empty() {
                0
            } else {
                haystack.matches(needle.as_str()).count()
            };
            KeywordCount {
                keyword: keyword.clone(),
                count,
            }
        })
        .collect();
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// Wraps every case-insensitive keyword occurrence as `🎯**match**`.
pub fn highlight(text: &str, keywords: &[String]) -> String {
    let mut highlighted = text.to_string();
    for keyword in keywords.iter().filter(|keyword| !keyword.is_empty()) {
        let Ok(pattern) = RegexBuilder::new(&regex::escape(keyword))
            .case_insensitive(true)
            .build()
        else {
            continue;
        };
        let replacement = format!("{HIGHLIGHT_MARKER}**${{0}}**");
        highlighted = pattern
            .replace_all(&highlighted, replacement.as_str())
            .into_owned();
    }
    highlighted
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResumeStats {
    pub characters: usize,
    pub words: usize,
    pub lines: usize,
}

impl ResumeStats {
    pub fn of(text: &str) -> Self {
        Self {
            characters: text.chars().count(),
            words: text.split_whitespace().count(),
            lines: text.matches('\n').count() + 1,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ModeCounts {
    pub keyword: usize,
    pub name: usize,
    pub id: usize,
}

impl ModeCounts {
    pub fn of(hits: &[SearchHit]) -> Self {
        hits.iter().fold(Self::default(), |mut counts, hit| {
            match hit.kind {
                SearchKind::Keyword => counts.keyword += 1,
                SearchKind::Name => counts.name += 1,
                SearchKind::Id => counts.id += 1,
            }
            counts
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keywords(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn occurrences_are_counted_case_insensitively() {
        let counts = keyword_occurrences(
            "Java, JAVA e javascript. SQL",
            &keywords(&["sql", "java", "go"]),
        );
        let summary: Vec<(&str, usize)> = counts
            .iter()
            .map(|count| (count.keyword.as_str(), count.count))
            .collect();
        assert_eq!(summary, vec![("java", 3), ("sql", 1), ("go", 0)]);
    }

    #[test]
    fn highlight_keeps_original_casing() {
        let text = highlight("Python e PYTHON (c++)", &keywords(&["python", "c++"]));
        assert_eq!(text, "🎯**Python** e 🎯**PYTHON** (🎯**c++**)");
    }

    #[test]
    fn resume_stats_count_chars_words_lines() {
        let stats = ResumeStats::of("Olá mundo\nengenharia de dados");
        assert_eq!(
            stats,
            ResumeStats {
                characters: 29,
                words: 5,
                lines: 2
            }
        );
    }
}
