use super::encoder::{EncoderError, TextEncoder};
use super::similarity::cosine_similarity;
use crate::dataset::NOT_INFORMED;
use std::sync::Arc;

/// Scores how well a résumé fits a job's requirements.
#[derive(Clone)]
pub struct CompatibilityScorer {
    encoder: Arc<dyn TextEncoder>,
}

impl std::fmt::Debug for CompatibilityScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompatibilityScorer")
            .field("encoder", &self.encoder.name())
            .finish()
    }
}

impl CompatibilityScorer {
    pub fn new(encoder: Arc<dyn TextEncoder>) -> Self {
        Self { encoder }
    }

    /// Cosine similarity of the two encoded texts, in `[0, 1]`.
    ///
    /// Missing, blank or sentinel input on either side scores `0.0` without
    /// calling the encoder.
    pub fn score(&self, job_text: Option<&str>, resume: Option<&str>) -> Result<f32, EncoderError> {
        let (Some(job_text), Some(resume)) = (usable(job_text), usable(resume)) else {
            return Ok(0.0);
        };
        let job_vector = self.encoder.encode(job_text)?;
        let resume_vector = self.encoder.encode(resume)?;
        Ok(cosine_similarity(&job_vector, &resume_vector))
    }

    /// Scores many résumés against one job, encoding the job text once.
    pub fn score_many<'a, I>(
        &self,
        job_text: Option<&str>,
        resumes: I,
    ) -> Result<Vec<f32>, EncoderError>
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let job_vector = match usable(job_text) {
            Some(text) => Some(self.encoder.encode(text)?),
            None => None,
        };

        resumes
            .into_iter()
            .map(|resume| -> Result<f32, EncoderError> {
                match (&job_vector, usable(resume)) {
                    (Some(job_vector), Some(resume)) => {
                        let resume_vector = self.encoder.encode(resume)?;
                        Ok(cosine_similarity(job_vector, &resume_vector))
                    }
                    _ => Ok(0.0),
                }
            })
            .collect()
    }
}

fn usable(text: Option<&str>) -> Option<&str> {
    text.filter(|text| !text.trim().is_empty() && *text != NOT_INFORMED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::HashingEncoder;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingEncoder {
        calls: AtomicUsize,
    }

    impl TextEncoder for CountingEncoder {
        fn encode(&self, _text: &str) -> Result<Vec<f32>, EncoderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![1.0, 0.0])
        }

        fn dimensions(&self) -> usize {
            2
        }

        fn name(&self) -> &str {
            "counting"
        }
    }

    fn hashing() -> CompatibilityScorer {
        CompatibilityScorer::new(Arc::new(HashingEncoder::new(384)))
    }

    #[test]
    fn degenerate_input_short_circuits() {
        let encoder = Arc::new(CountingEncoder {
            calls: AtomicUsize::new(0),
        });
        let scorer = CompatibilityScorer::new(encoder.clone());
        assert_eq!(scorer.score(None, Some("Python")).expect("scores"), 0.0);
        assert_eq!(scorer.score(Some("   "), Some("Python")).expect("scores"), 0.0);
        assert_eq!(scorer.score(Some("Python"), Some(NOT_INFORMED)).expect("scores"), 0.0);
        assert_eq!(encoder.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn overlapping_texts_score_higher_than_disjoint_ones() {
        let scorer = hashing();
        let job = Some("Desenvolvedor Python com SQL e Docker");
        let close = scorer.score(job, Some("Python, SQL, Docker, Kubernetes")).expect("scores");
        let far = scorer.score(job, Some("Contador com experiência fiscal")).expect("scores");
        assert!(close > far, "close={close} far={far}");
        assert!((0.0..=1.0).contains(&close));
    }

    #[test]
    fn batch_scoring_encodes_job_once() {
        let encoder = Arc::new(CountingEncoder {
            calls: AtomicUsize::new(0),
        });
        let scorer = CompatibilityScorer::new(encoder.clone());
        let scores = scorer
            .score_many(Some("Java"), [Some("Java"), None, Some("Go")])
            .expect("scores");
        assert_eq!(scores, vec![1.0, 0.0, 1.0]);
        assert_eq!(encoder.calls.load(Ordering::SeqCst), 3);
    }
}
