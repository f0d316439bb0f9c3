use super::encoder::EncoderError;
use super::scorer::CompatibilityScorer;
use super::DEFAULT_PAGE_SIZE;
use crate::dataset::{ApplicationRecord, Dataset};
use serde::Serialize;
use tracing::info;

/// How the job under analysis is chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobSelector {
    Id(String),
    Title(String),
}

impl JobSelector {
    /// An id takes precedence over a title when both are given.
    pub fn from_options(job_id: Option<String>, job_title: Option<String>) -> Option<Self> {
        let non_blank = |value: Option<String>| value.filter(|value| !value.trim().is_empty());
        match (non_blank(job_id), non_blank(job_title)) {
            (Some(id), _) => Some(Self::Id(id.trim().to_string())),
            (None, Some(title)) => Some(Self::Title(title)),
            (None, None) => None,
        }
    }

    fn matches(&self, record: &ApplicationRecord) -> bool {
        match self {
            Self::Id(id) => record.job_id == *id,
            Self::Title(title) => record.job_title == *title,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchBand {
    Excellent,
    Good,
    Fair,
    Low,
}

impl MatchBand {
    pub fn from_score(score: f32) -> Self {
        let percent = score * 100.0;
        if percent > 70.0 {
            Self::Excellent
        } else if percent > 50.0 {
            Self::Good
        } else if percent > 30.0 {
            Self::Fair
        } else {
            Self::Low
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excelente",
            Self::Good => "Boa",
            Self::Fair => "Média",
            Self::Low => "Baixa",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchEntry {
    pub candidate_id: String,
    pub candidate_name: String,
    pub job_id: String,
    pub application_status: String,
    pub score: f32,
    pub band: MatchBand,
    pub band_label: &'static str,
    pub resume: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchReport {
    pub job_label: String,
    pub requirements: String,
    pub candidate_count: usize,
    pub mean_score: f32,
    pub max_score: f32,
    pub entries: Vec<MatchEntry>,
}

/// Scores every named candidate of the selected job and sorts them by score,
/// best first. Ties keep table order.
pub fn rank_candidates(
    dataset: &Dataset,
    selector: &JobSelector,
    scorer: &CompatibilityScorer,
) -> Result<MatchReport, EncoderError> {
    let selected: Vec<&ApplicationRecord> = dataset
        .named()
        .filter(|record| selector.matches(record))
        .collect();

    let job_label = match (selector, selected.first()) {
        (JobSelector::Title(title), _) => title.clone(),
        (JobSelector::Id(_), Some(first)) => first.job_title.clone(),
        (JobSelector::Id(id), None) => format!("ID: {id}"),
    };
    let requirements = selected
        .first()
        .map(|record| record.job_requirements.clone())
        .unwrap_or_default();

    let scores = scorer.score_many(
        selected.first().and_then(|record| record.requirements()),
        selected.iter().map(|record| record.resume()),
    )?;

    let mut entries: Vec<MatchEntry> = selected
        .iter()
        .zip(scores)
        .map(|(record, score)| {
            let band = MatchBand::from_score(score);
            MatchEntry {
                candidate_id: record.candidate_id.clone(),
                candidate_name: record.candidate_name.clone(),
                job_id: record.job_id.clone(),
                application_status: record.application_status.clone(),
                score,
                band,
                band_label: band.label(),
                resume: record.candidate_resume.clone(),
            }
        })
        .collect();
    entries.sort_by(|a, b| b.score.total_cmp(&a.score));

    let candidate_count = entries.len();
    let (mean_score, max_score) = if entries.is_empty() {
        (0.0, 0.0)
    } else {
        let total: f32 = entries.iter().map(|entry| entry.score).sum();
        let max = entries.iter().map(|entry| entry.score).fold(0.0f32, f32::max);
        (total / candidate_count as f32, max)
    };

    info!(
        job = %job_label,
        candidates = candidate_count,
        mean_score,
        max_score,
        "ranked candidates"
    );

    Ok(MatchReport {
        job_label,
        requirements,
        candidate_count,
        mean_score,
        max_score,
        entries,
    })
}

/// One page of a longer result list.
#[derive(Debug, Clone, Serialize)]
pub struct Page<'a, T> {
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    /// 1-based position of the first item on this page.
    pub first_item: usize,
    pub items: &'a [T],
}

/// Slices `items` into 1-based pages. Out-of-range pages clamp to the
/// nearest valid one and there is always at least one page.
pub fn paginate<T>(items: &[T], page: usize, per_page: usize) -> Page<'_, T> {
    let per_page = if per_page == 0 {
        DEFAULT_PAGE_SIZE
    } else {
        per_page
    };
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page).max(1);
    let page = page.clamp(1, total_pages);
    let start = ((page - 1) * per_page).min(total_items);
    let end = (start + per_page).min(total_items);

    Page {
        page,
        total_pages,
        total_items,
        first_item: start + 1,
        items: &items[start..end],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::HashingEncoder;
    use std::sync::Arc;

    fn record(
        candidate: &str,
        job: &str,
        name: Option<&str>,
        resume: &str,
        requirements: &str,
    ) -> ApplicationRecord {
        ApplicationRecord::from_parts(
            candidate.to_string(),
            job.to_string(),
            Some("Prospect".to_string()),
            name.map(str::to_string),
            Some(resume.to_string()),
            Some("Desenvolvedor Python".to_string()),
            Some(requirements.to_string()),
        )
    }

    fn dataset() -> Dataset {
        Dataset::new(vec![
            record("1", "10", Some("Ana"), "Contabilidade e auditoria fiscal", "Python SQL Docker"),
            record("2", "10", Some("Bruno"), "Python SQL Docker", "ignored"),
            record("3", "10", None, "Python SQL Docker", "ignored"),
            record("4", "11", Some("Caio"), "Python", "Java"),
        ])
    }

    fn scorer() -> CompatibilityScorer {
        CompatibilityScorer::new(Arc::new(HashingEncoder::new(384)))
    }

    #[test]
    fn ranks_named_candidates_by_score() {
        let report = rank_candidates(&dataset(), &JobSelector::Id("10".to_string()), &scorer())
            .expect("ranks");
        let ids: Vec<&str> = report
            .entries
            .iter()
            .map(|entry| entry.candidate_id.as_str())
            .collect();
        assert_eq!(ids, vec!["2", "1"]);
        assert_eq!(report.candidate_count, 2);
        assert_eq!(report.job_label, "Desenvolvedor Python");
        assert_eq!(report.requirements, "Python SQL Docker");
        assert!((report.entries[0].score - 1.0).abs() < 1e-5);
        assert_eq!(report.entries[0].band, MatchBand::Excellent);
        assert_eq!(report.max_score, report.entries[0].score);
    }

    #[test]
    fn unknown_job_id_yields_empty_report() {
        let report = rank_candidates(&dataset(), &JobSelector::Id("99".to_string()), &scorer())
            .expect("ranks");
        assert_eq!(report.job_label, "ID: 99");
        assert_eq!(report.candidate_count, 0);
        assert_eq!(report.mean_score, 0.0);
        assert_eq!(report.max_score, 0.0);
    }

    #[test]
    fn id_wins_over_title() {
        let selector =
            JobSelector::from_options(Some(" 10 ".to_string()), Some("Outra".to_string()));
        assert_eq!(selector, Some(JobSelector::Id("10".to_string())));
        assert_eq!(
            JobSelector::from_options(Some(String::new()), Some("Dev".to_string())),
            Some(JobSelector::Title("Dev".to_string()))
        );
        assert_eq!(JobSelector::from_options(None, None), None);
    }

    #[test]
    fn bands_follow_percent_thresholds() {
        assert_eq!(MatchBand::from_score(0.71), MatchBand::Excellent);
        assert_eq!(MatchBand::from_score(0.70), MatchBand::Good);
        assert_eq!(MatchBand::from_score(0.31).label(), "Média");
        assert_eq!(MatchBand::from_score(0.0).label(), "Baixa");
    }

    #[test]
    fn pages_are_clamped_and_never_empty_in_count() {
        let items: Vec<u32> = (1..=23).collect();
        let last = paginate(&items, 3, 10);
        assert_eq!(last.total_pages, 3);
        assert_eq!(last.items, &[21, 22, 23]);
        assert_eq!(last.first_item, 21);

        let beyond = paginate(&items, 9, 10);
        assert_eq!(beyond.page, 3);

        let empty: Vec<u32> = Vec::new();
        let page = paginate(&empty, 0, 10);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 1);
        assert!(page.items.is_empty());
    }
}
