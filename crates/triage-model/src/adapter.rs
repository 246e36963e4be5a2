//! Bridges symptom names to the classifier's feature-vector input.

use std::sync::Arc;

use tracing::debug;

use triage_data::SymptomUniverse;

use crate::backend::Classifier;
use crate::error::ModelError;

/// Encodes a symptom set against the universe and delegates to the
/// classifier for a single top-1 label.
pub struct PredictionAdapter {
    universe: Arc<SymptomUniverse>,
    classifier: Box<dyn Classifier>,
}

impl std::fmt::Debug for PredictionAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PredictionAdapter")
            .field("universe", &self.universe)
            .finish_non_exhaustive()
    }
}

impl PredictionAdapter {
    /// Pair a universe with a loaded classifier.
    ///
    /// The two must agree on the feature count; a mismatch means the model
    /// was trained against a different training table and is fatal at
    /// startup.
    pub fn new(
        universe: Arc<SymptomUniverse>,
        classifier: Box<dyn Classifier>,
    ) -> Result<Self, ModelError> {
        if classifier.n_features() != universe.len() {
            return Err(ModelError::FeatureLength {
                expected: classifier.n_features(),
                got: universe.len(),
            });
        }
        Ok(Self {
            universe,
            classifier,
        })
    }

    /// The symptom universe this adapter encodes against.
    pub fn universe(&self) -> &SymptomUniverse {
        &self.universe
    }

    /// Predict the disease for a set of symptom names.
    ///
    /// Names outside the universe are silently ignored; the feature vector
    /// is built in universe order and passed to the model verbatim.
    pub fn predict(&self, symptoms: &[String]) -> Result<String, ModelError> {
        let features = self.universe.encode(symptoms);
        let prognosis = self.classifier.predict(&features)?;
        debug!(symptoms = symptoms.len(), prognosis = %prognosis, "prediction complete");
        Ok(prognosis)
    }
}
