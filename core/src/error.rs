use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("document text is empty or whitespace-only")]
    EmptyInput,

    #[error("segmentation produced no clauses")]
    NoClausesFound,

    #[error("feature extractor unusable: {0}")]
    UnfittedExtractor(String),

    #[error("model and extractor artifacts do not match: {0}")]
    ArtifactMismatch(String),

    #[error("training data rejected: {0}")]
    TrainingData(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

/// Stable, message-independent error kinds for boundary code to branch on.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    EMPTY_INPUT,
    NO_CLAUSES_FOUND,
    UNFITTED_EXTRACTOR,
    ARTIFACT_MISMATCH,
    TRAINING_DATA,
    INVALID_CONFIG,
    IO,
    JSON,
    CSV,
}

impl CoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyInput => ErrorKind::EMPTY_INPUT,
            Self::NoClausesFound => ErrorKind::NO_CLAUSES_FOUND,
            Self::UnfittedExtractor(_) => ErrorKind::UNFITTED_EXTRACTOR,
            Self::ArtifactMismatch(_) => ErrorKind::ARTIFACT_MISMATCH,
            Self::TrainingData(_) => ErrorKind::TRAINING_DATA,
            Self::InvalidConfig(_) => ErrorKind::INVALID_CONFIG,
            Self::Io(_) => ErrorKind::IO,
            Self::Json(_) => ErrorKind::JSON,
            Self::Csv(_) => ErrorKind::CSV,
        }
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
