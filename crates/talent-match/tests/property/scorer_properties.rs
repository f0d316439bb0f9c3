use proptest::prelude::*;
use std::sync::Arc;
use talent_match::dataset::ApplicationRecord;
use talent_match::matching::{CompatibilityScorer, HashingEncoder};
use talent_match::search::{search_candidates, SearchQuery};
use talent_match::NOT_INFORMED;

fn scorer() -> CompatibilityScorer {
    CompatibilityScorer::new(Arc::new(HashingEncoder::new(384)))
}

proptest! {
    #[test]
    fn score_is_bounded(job in ".{1,200}", resume in ".{1,200}") {
        let score = scorer().score(Some(&job), Some(&resume)).expect("local encoder never fails");
        prop_assert!((0.0..=1.0).contains(&score), "score {} out of range", score);
    }

    #[test]
    fn score_is_symmetric(a in "[a-zA-Zçãé ,.]{0,120}", b in "[a-zA-Zçãé ,.]{0,120}") {
        let scorer = scorer();
        let forward = scorer.score(Some(&a), Some(&b)).expect("scores");
        let backward = scorer.score(Some(&b), Some(&a)).expect("scores");
        prop_assert_eq!(forward, backward);
    }

    #[test]
    fn degenerate_side_scores_zero(text in ".{0,120}", blank in "[ \t\n]{0,10}") {
        let scorer = scorer();
        prop_assert_eq!(scorer.score(Some(&text), None).expect("scores"), 0.0);
        prop_assert_eq!(scorer.score(Some(&blank), Some(&text)).expect("scores"), 0.0);
        prop_assert_eq!(scorer.score(Some(NOT_INFORMED), Some(&text)).expect("scores"), 0.0);
    }

    #[test]
    fn keyword_hits_contain_every_keyword(
        resumes in prop::collection::vec("[a-z ]{0,40}", 1..20),
        keywords in prop::collection::vec("[a-z]{1,3}", 1..3),
    ) {
        let records: Vec<ApplicationRecord> = resumes
            .iter()
            .enumerate()
            .map(|(index, resume)| {
                ApplicationRecord::from_parts(
                    index.to_string(),
                    "1".to_string(),
                    None,
                    None,
                    Some(resume.clone()),
                    None,
                    None,
                )
            })
            .collect();
        let query = SearchQuery::new(Some(&keywords.join(",")), None, None);

        for hit in search_candidates(&records, &query) {
            for keyword in &keywords {
                prop_assert!(hit.record.candidate_resume.contains(keyword.as_str()));
            }
        }
    }
}
