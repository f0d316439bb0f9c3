use crate::infra::{load_dataset, parse_page, print_json, AppContext, DataSource, OutputFormat};
use crate::render;
use clap::{ArgGroup, Args};
use serde::Serialize;
use std::path::PathBuf;
use talent_match::config::AppConfig;
use talent_match::dataset::DatasetStats;
use talent_match::error::AppError;
use talent_match::matching::{
    paginate, rank_candidates, JobSelector, MatchEntry, MatchReport, Page, DEFAULT_PAGE_SIZE,
};
use talent_match::profiling::{
    build_hired_report, CandidateProfile, HiredProfileReport, LabelCount, ProfileMetrics,
    StatusBreakdownEntry,
};
use talent_match::search::{
    highlight, keyword_occurrences, search_candidates, KeywordCount, ModeCounts, ResumeStats,
    SearchHit, SearchKind, SearchQuery,
};
use tracing::info;

#[derive(Args, Debug, Default)]
pub(crate) struct PreprocessArgs {
    /// Read prospects.json, applicants.json and vagas.json from this directory
    /// instead of downloading
    #[arg(long)]
    pub(crate) local_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("job").required(true).multiple(true).args(["job_id", "job_title"])))]
pub(crate) struct MatchArgs {
    /// Job id to analyze (takes precedence over --job-title)
    #[arg(long)]
    pub(crate) job_id: Option<String>,
    /// Exact job title to analyze
    #[arg(long)]
    pub(crate) job_title: Option<String>,
    /// Result page (1-based)
    #[arg(long, default_value_t = 1, value_parser = parse_page)]
    pub(crate) page: usize,
    /// Candidates per page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE, value_parser = parse_page)]
    pub(crate) per_page: usize,
}

#[derive(Args, Debug, Default)]
pub(crate) struct SearchArgs {
    /// Comma-separated keywords that must all appear
    #[arg(long)]
    pub(crate) keywords: Option<String>,
    /// Part of the candidate name
    #[arg(long)]
    pub(crate) name: Option<String>,
    /// Exact candidate id
    #[arg(long)]
    pub(crate) id: Option<String>,
    /// Result page (1-based)
    #[arg(long, default_value_t = 1, value_parser = parse_page)]
    pub(crate) page: usize,
    /// Show the full record of one candidate from the results
    #[arg(long, value_name = "CANDIDATE_ID")]
    pub(crate) details: Option<String>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct HiredArgs {
    /// Restrict the analysis to one job title
    #[arg(long)]
    pub(crate) job_title: Option<String>,
    /// Include the list of hired candidates
    #[arg(long)]
    pub(crate) list: bool,
    /// Page of the hired list (1-based)
    #[arg(long, default_value_t = 1, value_parser = parse_page)]
    pub(crate) page: usize,
}

#[derive(Debug, Serialize)]
pub(crate) struct PreprocessSummary {
    pub(crate) snapshot_path: PathBuf,
    pub(crate) stats: DatasetStats,
}

#[derive(Debug, Serialize)]
pub(crate) struct MatchView<'a> {
    pub(crate) job_label: &'a str,
    pub(crate) requirements: &'a str,
    pub(crate) candidate_count: usize,
    pub(crate) mean_score: f32,
    pub(crate) max_score: f32,
    pub(crate) results: Page<'a, MatchEntry>,
}

impl<'a> MatchView<'a> {
    pub(crate) fn new(report: &'a MatchReport, page: usize, per_page: usize) -> Self {
        Self {
            job_label: &report.job_label,
            requirements: &report.requirements,
            candidate_count: report.candidate_count,
            mean_score: report.mean_score,
            max_score: report.max_score,
            results: paginate(&report.entries, page, per_page),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct SearchView<'a> {
    pub(crate) keywords: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) candidate_id: Option<&'a str>,
    pub(crate) total: usize,
    pub(crate) by_mode: ModeCounts,
    pub(crate) results: Page<'a, SearchHit>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CandidateDetail<'a> {
    pub(crate) hit: &'a SearchHit,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) resume_stats: Option<ResumeStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) highlighted_resume: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) keyword_counts: Vec<KeywordCount>,
}

impl<'a> CandidateDetail<'a> {
    /// Highlighting and keyword counts only apply to keyword hits.
    pub(crate) fn new(hit: &'a SearchHit, keywords: &[String]) -> Self {
        let resume = hit.record.resume();
        let keyword_hit = hit.kind == SearchKind::Keyword && !keywords.is_empty();
        Self {
            hit,
            resume_stats: resume.map(ResumeStats::of),
            highlighted_resume: resume.map(|text| {
                if keyword_hit {
                    highlight(text, keywords)
                } else {
                    text.to_string()
                }
            }),
            keyword_counts: match resume {
                Some(text) if keyword_hit => keyword_occurrences(text, keywords),
                _ => Vec::new(),
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct HiredView<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) job_title: Option<&'a str>,
    pub(crate) metrics: &'a ProfileMetrics,
    pub(crate) experience_distribution: &'a [LabelCount],
    pub(crate) language_distribution: &'a [LabelCount],
    pub(crate) education_distribution: &'a [LabelCount],
    pub(crate) top_skills: &'a [LabelCount],
    pub(crate) status_breakdown: &'a [StatusBreakdownEntry],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) hired: Option<Page<'a, CandidateProfile>>,
}

impl<'a> HiredView<'a> {
    pub(crate) fn new(report: &'a HiredProfileReport, list: bool, page: usize) -> Self {
        Self {
            job_title: report.job_title.as_deref(),
            metrics: &report.metrics,
            experience_distribution: &report.experience_distribution,
            language_distribution: &report.language_distribution,
            education_distribution: &report.education_distribution,
            top_skills: &report.top_skills,
            status_breakdown: &report.status_breakdown,
            hired: list.then(|| paginate(&report.profiles, page, DEFAULT_PAGE_SIZE)),
        }
    }
}

pub(crate) fn run_preprocess(
    config: &AppConfig,
    args: PreprocessArgs,
    format: OutputFormat,
) -> Result<(), AppError> {
    let source = match args.local_dir {
        Some(dir) => DataSource::LocalDir(dir),
        None => DataSource::Download,
    };
    let dataset = load_dataset(config, &source)?;
    dataset.write_snapshot(&config.dataset.snapshot_path)?;
    info!(path = %config.dataset.snapshot_path.display(), "preprocessing finished");

    let summary = PreprocessSummary {
        snapshot_path: config.dataset.snapshot_path.clone(),
        stats: dataset.stats(),
    };
    match format {
        OutputFormat::Json => print_json(&summary),
        OutputFormat::Text => {
            render::render_preprocess(&summary);
            Ok(())
        }
    }
}

pub(crate) fn run_stats(context: &AppContext, format: OutputFormat) -> Result<(), AppError> {
    let stats = context.dataset.stats();
    match format {
        OutputFormat::Json => print_json(&stats),
        OutputFormat::Text => {
            render::render_stats(&stats);
            Ok(())
        }
    }
}

pub(crate) fn match_report(
    context: &AppContext,
    args: &MatchArgs,
) -> Result<MatchReport, AppError> {
    let selector = JobSelector::from_options(args.job_id.clone(), args.job_title.clone())
        .ok_or_else(|| AppError::Usage("provide a non-blank --job-id or --job-title".to_string()))?;
    Ok(rank_candidates(&context.dataset, &selector, &context.scorer)?)
}

pub(crate) fn run_match(
    context: &AppContext,
    args: MatchArgs,
    format: OutputFormat,
) -> Result<(), AppError> {
    let report = match_report(context, &args)?;
    let view = MatchView::new(&report, args.page, args.per_page);
    match format {
        OutputFormat::Json => print_json(&view),
        OutputFormat::Text => {
            render::render_match(&view);
            Ok(())
        }
    }
}

pub(crate) fn search_query(args: &SearchArgs) -> Result<SearchQuery, AppError> {
    let query = SearchQuery::new(
        args.keywords.as_deref(),
        args.name.as_deref(),
        args.id.as_deref(),
    );
    if query.is_empty() {
        return Err(AppError::Usage(
            "provide at least one of --keywords, --name or --id".to_string(),
        ));
    }
    Ok(query)
}

pub(crate) fn run_search(
    context: &AppContext,
    args: SearchArgs,
    format: OutputFormat,
) -> Result<(), AppError> {
    let query = search_query(&args)?;
    let hits = search_candidates(context.dataset.records(), &query);
    info!(hits = hits.len(), "search finished");

    if let Some(candidate_id) = args.details.as_deref() {
        let hit = hits
            .iter()
            .find(|hit| hit.record.candidate_id == candidate_id)
            .ok_or_else(|| {
                AppError::NotFound(format!("candidate {candidate_id} is not in the search results"))
            })?;
        let detail = CandidateDetail::new(hit, &query.keywords);
        return match format {
            OutputFormat::Json => print_json(&detail),
            OutputFormat::Text => {
                render::render_candidate_detail(&detail);
                Ok(())
            }
        };
    }

    let view = SearchView {
        keywords: &query.keywords,
        name: query.name.as_deref(),
        candidate_id: query.candidate_id.as_deref(),
        total: hits.len(),
        by_mode: ModeCounts::of(&hits),
        results: paginate(&hits, args.page, DEFAULT_PAGE_SIZE),
    };
    match format {
        OutputFormat::Json => print_json(&view),
        OutputFormat::Text => {
            render::render_search(&view);
            Ok(())
        }
    }
}

pub(crate) fn run_hired(
    context: &AppContext,
    args: HiredArgs,
    format: OutputFormat,
) -> Result<(), AppError> {
    let report = build_hired_report(
        &context.dataset,
        &context.hired_policy,
        args.job_title.as_deref(),
    );
    let view = HiredView::new(&report, args.list, args.page);
    match format {
        OutputFormat::Json => print_json(&view),
        OutputFormat::Text => {
            render::render_hired(&view);
            Ok(())
        }
    }
}
