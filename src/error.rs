//! Error types for the mlsim engine

use crate::training::ModelKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MlsimError {
    #[error("dataset contains no records")]
    EmptyDataset,

    #[error("inconsistent feature length: expected {expected}, got {actual}")]
    InconsistentFeatureLength { expected: usize, actual: usize },

    #[error("unsupported model kind: {0}")]
    UnsupportedModelKind(ModelKind),

    #[error("feature length mismatch: model expects {expected}, got {actual}")]
    FeatureLengthMismatch { expected: usize, actual: usize },

    #[error("length mismatch: {predictions} predictions vs {actuals} actuals")]
    LengthMismatch { predictions: usize, actuals: usize },

    #[error("input is empty")]
    EmptyInput,

    #[error("validation error: {0}")]
    Validation(String),

    #[error("data error: {0}")]
    Data(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MlsimError>;

impl MlsimError {
    /// Process exit code for the CLI: 2 for unsupported model kinds,
    /// 1 for every other rejected input.
    pub fn exit_code(&self) -> i32 {
        match self {
            MlsimError::UnsupportedModelKind(_) => 2,
            _ => 1,
        }
    }
}
