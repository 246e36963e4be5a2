//! The symptom universe: the fixed, ordered set of symptom names taken from
//! the training table's header. Order matters — it defines each symptom's
//! position in the feature vector.

use std::collections::HashSet;
use std::io;
use std::path::Path;

use tracing::info;

use triage_core::error::{Result, TriageError};

/// Ordered symptom names, fixed at startup.
#[derive(Debug, Clone)]
pub struct SymptomUniverse {
    symptoms: Vec<String>,
}

impl SymptomUniverse {
    /// Build a universe from an explicit ordered list of names.
    pub fn new(symptoms: Vec<String>) -> Self {
        Self { symptoms }
    }

    /// Read the universe from a training table.
    ///
    /// The header row lists the symptoms; the final column is the prognosis
    /// label and is excluded. The data rows are not needed here — the model
    /// was trained offline.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self> {
        let mut csv = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);
        let headers = csv
            .headers()
            .map_err(|e| TriageError::Data(format!("training table header: {e}")))?;

        if headers.len() < 2 {
            return Err(TriageError::Data(
                "training table must have at least one symptom column and a prognosis column"
                    .to_string(),
            ));
        }

        let symptoms: Vec<String> = headers
            .iter()
            .take(headers.len() - 1)
            .map(|h| h.trim().to_string())
            .collect();

        Ok(Self { symptoms })
    }

    /// Read the universe from a training table on disk.
    pub fn load(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path).map_err(|e| {
            TriageError::Data(format!("cannot open training table {}: {e}", path.display()))
        })?;
        let universe = Self::from_reader(file)?;
        info!(symptoms = universe.len(), "symptom universe loaded");
        Ok(universe)
    }

    /// The symptom names in table-defined order.
    pub fn symptoms(&self) -> &[String] {
        &self.symptoms
    }

    pub fn len(&self) -> usize {
        self.symptoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symptoms.is_empty()
    }

    /// Encode a set of symptom names as a 0/1 feature vector in universe
    /// order. Names outside the universe are silently ignored; the output
    /// length always equals the universe size.
    pub fn encode(&self, present: &[String]) -> Vec<u8> {
        let present: HashSet<&str> = present.iter().map(|s| s.as_str()).collect();
        self.symptoms
            .iter()
            .map(|symptom| u8::from(present.contains(symptom.as_str())))
            .collect()
    }
}
