use super::record::ApplicationRecord;
use super::sources::{Applicant, JobPosting, RawSources};
use tracing::{debug, warn};

/// Flattens prospects into one record per (candidate, job) application,
/// following prospect document order.
///
/// Applicants or jobs absent from their documents contribute sentinel fields;
/// prospects without a usable candidate code are skipped.
pub fn join_sources(sources: &RawSources) -> Vec<ApplicationRecord> {
    let missing_applicant = Applicant::default();
    let missing_job = JobPosting::default();
    let mut records = Vec::with_capacity(sources.prospect_count());
    let mut skipped = 0usize;

    for (job_id, group) in &sources.prospects {
        let job = sources.jobs.get(job_id).unwrap_or(&missing_job);

        for prospect in &group.prospects {
            let Some(candidate_id) = prospect.candidate_id() else {
                skipped += 1;
                continue;
            };
            let applicant = sources
                .applicants
                .get(&candidate_id)
                .unwrap_or(&missing_applicant);

            records.push(ApplicationRecord::from_parts(
                candidate_id,
                job_id.clone(),
                prospect.situacao_candidado.clone(),
                applicant.name(),
                applicant.cv_pt.clone(),
                job.title(),
                job.requirements(),
            ));
        }
    }

    if skipped > 0 {
        warn!(skipped, "skipped prospects without a candidate code");
    }
    debug!(records = records.len(), "joined application sources");

    records
}
