pub mod config;
pub mod dataset;
pub mod error;
pub mod matching;
pub mod profiling;
pub mod search;
pub mod telemetry;

pub use dataset::{ApplicationRecord, Dataset, NOT_INFORMED};
pub use error::AppError;
