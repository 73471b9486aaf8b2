use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrainingError {
    #[error("Dataset not found at {0}")]
    DatasetNotFound(PathBuf),

    #[error("CSV must have 'url' and 'label' columns")]
    MissingColumns,

    #[error("Unrecognised label {value:?} on line {line}")]
    InvalidLabel { line: usize, value: String },

    #[error("Dataset contains no samples")]
    EmptyDataset,

    #[error("Training data contains a single class; both phishing and legitimate samples are required")]
    SingleClass,

    #[error("Invalid training configuration: {0}")]
    InvalidConfig(String),

    #[error("Artifact format version {found} is not supported (expected {expected})")]
    UnsupportedArtifactVersion { expected: u32, found: u32 },

    #[error("Model and vectorizer artifacts come from different training runs")]
    ArtifactMismatch,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type TrainingResult<T> = Result<T, TrainingError>;
