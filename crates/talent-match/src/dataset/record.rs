use serde::{Deserialize, Serialize};

/// Placeholder stored in any optional field the sources left empty.
pub const NOT_INFORMED: &str = "Não informado";

/// One candidate's application to one job, flattened from the three sources.
///
/// `candidate_id` and `job_id` always come from source keys. Every other
/// field holds [`NOT_INFORMED`] when the sources had nothing for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub candidate_id: String,
    pub job_id: String,
    pub application_status: String,
    pub candidate_name: String,
    pub candidate_resume: String,
    pub job_title: String,
    pub job_requirements: String,
}

impl ApplicationRecord {
    /// Builds a record from possibly-missing source values, filling gaps with
    /// the sentinel.
    pub fn from_parts(
        candidate_id: String,
        job_id: String,
        application_status: Option<String>,
        candidate_name: Option<String>,
        candidate_resume: Option<String>,
        job_title: Option<String>,
        job_requirements: Option<String>,
    ) -> Self {
        Self {
            candidate_id,
            job_id,
            application_status: or_not_informed(application_status),
            candidate_name: or_not_informed(candidate_name),
            candidate_resume: or_not_informed(candidate_resume),
            job_title: or_not_informed(job_title),
            job_requirements: or_not_informed(job_requirements),
        }
    }

    pub fn has_name(&self) -> bool {
        informed(&self.candidate_name).is_some()
    }

    pub fn name(&self) -> Option<&str> {
        informed(&self.candidate_name)
    }

    pub fn resume(&self) -> Option<&str> {
        informed(&self.candidate_resume)
    }

    pub fn status(&self) -> Option<&str> {
        informed(&self.application_status)
    }

    pub fn title(&self) -> Option<&str> {
        informed(&self.job_title)
    }

    pub fn requirements(&self) -> Option<&str> {
        informed(&self.job_requirements)
    }

    /// Re-applies sentinel filling. Idempotent.
    pub fn cleaned(mut self) -> Self {
        for field in [
            &mut self.application_status,
            &mut self.candidate_name,
            &mut self.candidate_resume,
            &mut self.job_title,
            &mut self.job_requirements,
        ] {
            if is_missing(field) {
                *field = NOT_INFORMED.to_string();
            }
        }
        self
    }
}

/// Returns the value unless it is empty or the sentinel.
pub fn informed(value: &str) -> Option<&str> {
    if value.is_empty() || value == NOT_INFORMED {
        None
    } else {
        Some(value)
    }
}

fn or_not_informed(value: Option<String>) -> String {
    value
        .filter(|value| !is_missing(value))
        .unwrap_or_else(|| NOT_INFORMED.to_string())
}

fn is_missing(value: &str) -> bool {
    value.is_empty()
}
