pub mod algorithm;
pub mod scaler;
pub mod weights;

pub use algorithm::{validate_schema, ImportanceScorer};
pub use scaler::ScalingPolicy;
pub use weights::{ImportanceWeights, ATTRIBUTES, ATTRIBUTE_LABELS};
