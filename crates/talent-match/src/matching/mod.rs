//! Job/résumé compatibility scoring and candidate ranking.

mod encoder;
mod ranking;
mod scorer;
mod similarity;

pub use encoder::{build_encoder, EncoderError, HashingEncoder, RemoteEncoder, TextEncoder};
pub use ranking::{paginate, rank_candidates, JobSelector, MatchBand, MatchEntry, MatchReport, Page};
pub use scorer::CompatibilityScorer;
pub use similarity::cosine_similarity;

pub const DEFAULT_PAGE_SIZE: usize = 10;
