use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScorerError {
    #[error("Invalid weights: sum must be positive and every weight non-negative")]
    InvalidWeights,

    #[error("Empty working set: no areas matched the configured allow-list")]
    EmptyInput,

    #[error("Unknown attribute: {attribute} is missing from every area")]
    UnknownAttribute { attribute: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ScorerError>;
