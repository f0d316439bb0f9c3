use crate::commands::{CandidateDetail, HiredView, MatchView, PreprocessSummary, SearchView};
use talent_match::dataset::DatasetStats;
use talent_match::profiling::LabelCount;

fn percent(score: f32) -> String {
    format!("{:.1}%", score * 100.0)
}

fn share(value: Option<f32>) -> String {
    value.map_or_else(|| "N/A".to_string(), |pct| format!("{pct:.1}%"))
}

pub(crate) fn render_preprocess(summary: &PreprocessSummary) {
    println!("Snapshot written to {}", summary.snapshot_path.display());
    render_stats(&summary.stats);
}

pub(crate) fn render_stats(stats: &DatasetStats) {
    println!("Dataset statistics");
    println!("- Applications: {}", stats.total_applications);
    println!("- Applications with a candidate name: {}", stats.named_applications);
    println!("- Distinct jobs: {}", stats.distinct_jobs);
    println!("- Distinct job titles: {}", stats.distinct_titles);
    println!("- Distinct candidates: {}", stats.distinct_candidates);

    if !stats.status_counts.is_empty() {
        println!("\nApplication status");
        for entry in &stats.status_counts {
            println!("- {}: {}", entry.status, entry.count);
        }
    }
}

pub(crate) fn render_match(view: &MatchView<'_>) {
    println!("Results for: {}", view.job_label);
    if view.candidate_count == 0 {
        println!("No named candidates applied to this job.");
        return;
    }

    println!(
        "Candidates {} | mean compatibility {} | best {}",
        view.candidate_count,
        percent(view.mean_score),
        percent(view.max_score)
    );
    let page = &view.results;
    println!(
        "Page {} of {} | candidates {}-{} of {}",
        page.page,
        page.total_pages,
        page.first_item,
        page.first_item + page.items.len() - 1,
        page.total_items
    );

    println!();
    for (offset, entry) in page.items.iter().enumerate() {
        println!(
            "{}. {} (ID {}) {} {}",
            page.first_item + offset,
            entry.candidate_name,
            entry.candidate_id,
            percent(entry.score),
            entry.band_label
        );
        println!("   Status: {}", entry.application_status);
    }
}

pub(crate) fn render_search(view: &SearchView<'_>) {
    let mut criteria = Vec::new();
    if !view.keywords.is_empty() {
        criteria.push(format!("keywords: {}", view.keywords.join(", ")));
    }
    if let Some(name) = view.name {
        criteria.push(format!("name: {name}"));
    }
    if let Some(candidate_id) = view.candidate_id {
        criteria.push(format!("id: {candidate_id}"));
    }
    println!("Search ({})", criteria.join(" | "));
    println!(
        "Found {} candidates ({} by keywords, {} by name, {} by id)",
        view.total, view.by_mode.keyword, view.by_mode.name, view.by_mode.id
    );
    if view.total == 0 {
        return;
    }

    let page = &view.results;
    if page.total_pages > 1 {
        println!("Page {} of {}", page.page, page.total_pages);
    }
    println!();
    for hit in page.items {
        println!(
            "- [{}] {} (ID {}) | {}",
            hit.kind.label(),
            hit.record.candidate_name,
            hit.record.candidate_id,
            hit.record.application_status
        );
        if !hit.found_in.is_empty() {
            let found: Vec<String> = hit
                .found_in
                .iter()
                .map(|keyword| {
                    let fields: Vec<&str> =
                        keyword.fields.iter().map(|field| field.label()).collect();
                    format!("{} in {}", keyword.keyword, fields.join(", "))
                })
                .collect();
            println!("  {} keyword(s): {}", hit.matches, found.join("; "));
        }
    }
}

pub(crate) fn render_candidate_detail(detail: &CandidateDetail<'_>) {
    let record = &detail.hit.record;
    println!("{} (ID {})", record.candidate_name, record.candidate_id);
    println!("- Job: {} (ID {})", record.job_title, record.job_id);
    println!("- Status: {}", record.application_status);
    println!("- Found by: {}", detail.hit.kind.label());

    match (&detail.highlighted_resume, detail.resume_stats) {
        (Some(resume), Some(stats)) => {
            println!(
                "\nResume ({} characters, {} words, {} lines)",
                stats.characters, stats.words, stats.lines
            );
            println!("{resume}");
        }
        _ => println!("\nResume: {}", record.candidate_resume),
    }

    if !detail.keyword_counts.is_empty() {
        println!("\nKeyword occurrences");
        for count in &detail.keyword_counts {
            println!("- {}: {}x", count.keyword, count.count);
        }
    }
}

fn render_distribution(title: &str, entries: &[LabelCount]) {
    if entries.is_empty() {
        println!("\n{title}: none specified");
        return;
    }
    println!("\n{title}");
    for entry in entries {
        println!("- {}: {}", entry.label, entry.count);
    }
}

pub(crate) fn render_hired(view: &HiredView<'_>) {
    match view.job_title {
        Some(title) => println!("Hired candidate profile for: {title}"),
        None => println!("Hired candidate profile (all jobs)"),
    }

    let metrics = view.metrics;
    println!("- Hired: {}", metrics.hired_count);
    println!(
        "- Mean experience: {}",
        metrics
            .mean_experience_years
            .map_or_else(|| "N/A".to_string(), |years| format!("{years:.1} anos"))
    );
    println!(
        "- Advanced/native language: {}",
        share(metrics.proficient_language_pct)
    );
    println!("- Higher education: {}", share(metrics.higher_education_pct));

    if metrics.hired_count > 0 {
        render_distribution("Experience", view.experience_distribution);
        render_distribution("Language level", view.language_distribution);
        render_distribution("Education", view.education_distribution);
        render_distribution("Top skills", view.top_skills);
    }

    println!("\nStatus breakdown");
    for entry in view.status_breakdown {
        let marker = if entry.hired { " (hired)" } else { "" };
        println!("- {}: {}{}", entry.status, entry.count, marker);
    }

    if let Some(page) = &view.hired {
        println!("\nHired candidates (page {} of {})", page.page, page.total_pages);
        for profile in page.items {
            println!(
                "- {} (ID {}) | {} | {}",
                profile.candidate_name,
                profile.candidate_id,
                profile.job_title,
                profile.application_status
            );
            println!(
                "  Experience: {} | Language: {} | Education: {}",
                profile.experience_label, profile.language_label, profile.education_label
            );
            if !profile.skills.is_empty() {
                println!("  Skills: {}", profile.skills.join(", "));
            }
        }
    }
}
