//! Fixed-label classifier for tests and offline development.

use crate::backend::Classifier;
use crate::error::ModelError;

/// Returns the same label for every input, after validating the feature
/// vector length.
#[derive(Debug, Clone)]
pub struct MockClassifier {
    label: String,
    n_features: usize,
}

impl MockClassifier {
    pub fn new(label: impl Into<String>, n_features: usize) -> Self {
        Self {
            label: label.into(),
            n_features,
        }
    }
}

impl Classifier for MockClassifier {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict(&self, features: &[u8]) -> Result<String, ModelError> {
        if features.len() != self.n_features {
            return Err(ModelError::FeatureLength {
                expected: self.n_features,
                got: features.len(),
            });
        }
        Ok(self.label.clone())
    }
}
