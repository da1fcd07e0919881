pub mod batch;
pub mod error;
pub mod scoring;
pub mod settings;
pub mod utils;

pub use error::MetricsError;
pub use scoring::{calculate_metrics, MetricsResult, QualityScorer};
