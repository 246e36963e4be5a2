//! Error types for model loading and inference.

use triage_core::error::TriageError;

/// Errors from the classifier backends and the prediction adapter.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("failed to load model: {0}")]
    Load(String),
    #[error("malformed model: {0}")]
    Malformed(String),
    #[error("feature vector has {got} entries, model expects {expected}")]
    FeatureLength { expected: usize, got: usize },
}

impl From<ModelError> for TriageError {
    fn from(err: ModelError) -> Self {
        TriageError::Model(err.to_string())
    }
}
