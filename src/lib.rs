pub mod config;
pub mod loader;
pub mod models;
pub mod render;
pub mod scoring;
pub mod tui;

pub use config::Settings;
pub use models::{AreaRecord, Result, ScoredArea, ScorerError};
pub use scoring::{ImportanceScorer, ImportanceWeights, ScalingPolicy};
