use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum WqiError {
    #[error("failed to load standard table from {path}: {reason}")]
    StandardsLoad { path: PathBuf, reason: String },

    #[error("invalid standard table: {0}")]
    StandardsInvalid(String),

    #[error("failed to load dashboard config from {path}: {reason}")]
    ConfigLoad { path: PathBuf, reason: String },

    #[error("invalid dashboard config: {0}")]
    ConfigInvalid(String),

    #[error("invalid sensor reading: {0}")]
    InvalidReading(String),

    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("no locations available")]
    NoLocations,

    #[error("no scored sample for location '{name}'")]
    NoScoredSample { name: String },

    #[error("failed to load locations from {path}: {reason}")]
    LocationsLoad { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
