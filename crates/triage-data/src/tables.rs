//! The four read-only lookup tables keyed by disease or symptom name.
//!
//! Loaded once at startup and never mutated; concurrent reads need no
//! locking. Diseases absent from a table degrade to documented fallback
//! values rather than failing the request.

use std::collections::HashMap;
use std::io;
use std::path::Path;

use tracing::info;

use triage_core::error::{Result, TriageError};
use triage_core::types::Severity;

/// Fallback description for a disease with no table entry.
pub const NO_DESCRIPTION: &str = "No description available.";
/// Fallback precaution list entry.
pub const NO_PRECAUTIONS: &str = "No specific precautions available.";
/// Fallback complication list entry.
pub const NO_COMPLICATIONS: &str = "No known complications.";

/// Immutable reference data for enriching a prediction.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTables {
    descriptions: HashMap<String, String>,
    precautions: HashMap<String, Vec<String>>,
    complications: HashMap<String, Vec<String>>,
    severities: HashMap<String, f64>,
}

impl ReferenceTables {
    /// Parse all four tables from in-memory or file readers.
    ///
    /// The description, precaution, and severity files are headerless; the
    /// complications file carries a header row. Duplicate keys keep the
    /// first occurrence.
    pub fn from_readers<D, P, S, C>(
        descriptions: D,
        precautions: P,
        severities: S,
        complications: C,
    ) -> Result<Self>
    where
        D: io::Read,
        P: io::Read,
        S: io::Read,
        C: io::Read,
    {
        Ok(Self {
            descriptions: parse_descriptions(descriptions)?,
            precautions: parse_string_lists(precautions, false, "precaution table")?,
            severities: parse_severities(severities)?,
            complications: parse_string_lists(complications, true, "complications table")?,
        })
    }

    /// Load all four tables from disk.
    pub fn load(
        description_path: &Path,
        precaution_path: &Path,
        severity_path: &Path,
        complications_path: &Path,
    ) -> Result<Self> {
        let tables = Self::from_readers(
            open(description_path)?,
            open(precaution_path)?,
            open(severity_path)?,
            open(complications_path)?,
        )?;
        info!(
            descriptions = tables.descriptions.len(),
            precautions = tables.precautions.len(),
            severities = tables.severities.len(),
            complications = tables.complications.len(),
            "reference tables loaded"
        );
        Ok(tables)
    }

    /// Description for a disease, or the documented fallback.
    pub fn description(&self, disease: &str) -> String {
        self.descriptions
            .get(disease)
            .cloned()
            .unwrap_or_else(|| NO_DESCRIPTION.to_string())
    }

    /// Ordered precautions for a disease, or a single-element fallback list.
    pub fn precautions(&self, disease: &str) -> Vec<String> {
        self.precautions
            .get(disease)
            .cloned()
            .unwrap_or_else(|| vec![NO_PRECAUTIONS.to_string()])
    }

    /// Known complications for a disease, or a single-element fallback list.
    pub fn complications(&self, disease: &str) -> Vec<String> {
        self.complications
            .get(disease)
            .cloned()
            .unwrap_or_else(|| vec![NO_COMPLICATIONS.to_string()])
    }

    /// Arithmetic mean of the severity weights of the supplied symptoms.
    ///
    /// Only names present in the severity table contribute; when none match,
    /// the `Unknown` sentinel is returned instead of a number.
    pub fn severity(&self, symptoms: &[String]) -> Severity {
        let found: Vec<f64> = symptoms
            .iter()
            .filter_map(|s| self.severities.get(s.as_str()).copied())
            .collect();

        if found.is_empty() {
            Severity::Unknown
        } else {
            Severity::Score(found.iter().sum::<f64>() / found.len() as f64)
        }
    }
}

fn open(path: &Path) -> Result<std::fs::File> {
    std::fs::File::open(path)
        .map_err(|e| TriageError::Data(format!("cannot open {}: {e}", path.display())))
}

/// Headerless two-column table: disease, description.
fn parse_descriptions<R: io::Read>(reader: R) -> Result<HashMap<String, String>> {
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(reader);

    let mut map = HashMap::new();
    for record in csv.records() {
        let record = record.map_err(|e| TriageError::Data(format!("description table: {e}")))?;
        let disease = field(&record, 0, "description table")?;
        let description = record.get(1).unwrap_or("").trim().to_string();
        map.entry(disease).or_insert(description);
    }
    Ok(map)
}

/// Key column followed by a variable number of value cells; empty cells are
/// dropped. Used for both the precaution and complications tables.
fn parse_string_lists<R: io::Read>(
    reader: R,
    has_headers: bool,
    table: &str,
) -> Result<HashMap<String, Vec<String>>> {
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(has_headers)
        .flexible(true)
        .from_reader(reader);

    let mut map = HashMap::new();
    for record in csv.records() {
        let record = record.map_err(|e| TriageError::Data(format!("{table}: {e}")))?;
        let key = field(&record, 0, table)?;
        let values: Vec<String> = record
            .iter()
            .skip(1)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .collect();
        map.entry(key).or_insert(values);
    }
    Ok(map)
}

/// Headerless two-column table: symptom, numeric weight.
fn parse_severities<R: io::Read>(reader: R) -> Result<HashMap<String, f64>> {
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(reader);

    let mut map = HashMap::new();
    for record in csv.records() {
        let record = record.map_err(|e| TriageError::Data(format!("severity table: {e}")))?;
        let symptom = field(&record, 0, "severity table")?;
        let raw = record.get(1).unwrap_or("").trim();
        let weight: f64 = raw.parse().map_err(|_| {
            TriageError::Data(format!("severity table: bad weight {raw:?} for {symptom:?}"))
        })?;
        map.entry(symptom).or_insert(weight);
    }
    Ok(map)
}

fn field(record: &csv::StringRecord, index: usize, table: &str) -> Result<String> {
    record
        .get(index)
        .map(|f| f.trim().to_string())
        .filter(|f| !f.is_empty())
        .ok_or_else(|| TriageError::Data(format!("{table}: missing key column")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DESCRIPTIONS: &str = "\
Fungal infection,\"A fungal infection of the skin, hair, or nails.\"
Migraine,Recurrent headache disorder.
";

    const PRECAUTIONS: &str = "\
Fungal infection,bath twice,use clean cloths,,keep the area dry
Migraine,rest in a dark room
";

    const SEVERITIES: &str = "\
itching,1
skin_rash,3
headache,5
";

    const COMPLICATIONS: &str = "\
Disease,Complication_1,Complication_2
Fungal infection,cellulitis,
Migraine,status migrainosus,chronic migraine
";

    fn tables() -> ReferenceTables {
        ReferenceTables::from_readers(
            DESCRIPTIONS.as_bytes(),
            PRECAUTIONS.as_bytes(),
            SEVERITIES.as_bytes(),
            COMPLICATIONS.as_bytes(),
        )
        .unwrap()
    }

    #[test]
    fn test_description_lookup_and_fallback() {
        let t = tables();
        assert_eq!(
            t.description("Fungal infection"),
            "A fungal infection of the skin, hair, or nails."
        );
        assert_eq!(t.description("DiseaseNotInTable"), NO_DESCRIPTION);
    }

    #[test]
    fn test_precautions_drop_empty_cells() {
        let t = tables();
        assert_eq!(
            t.precautions("Fungal infection"),
            vec!["bath twice", "use clean cloths", "keep the area dry"]
        );
    }

    #[test]
    fn test_precautions_fallback_is_single_element() {
        let t = tables();
        assert_eq!(t.precautions("DiseaseNotInTable"), vec![NO_PRECAUTIONS]);
    }

    #[test]
    fn test_complications_lookup_and_fallback() {
        let t = tables();
        assert_eq!(t.complications("Fungal infection"), vec!["cellulitis"]);
        assert_eq!(
            t.complications("Migraine"),
            vec!["status migrainosus", "chronic migraine"]
        );
        // Never empty and never an error for an unknown disease.
        assert_eq!(t.complications("DiseaseNotInTable"), vec![NO_COMPLICATIONS]);
    }

    #[test]
    fn test_severity_mean_over_matches() {
        let t = tables();
        let symptoms = vec!["itching".to_string(), "skin_rash".to_string()];
        assert_eq!(t.severity(&symptoms), Severity::Score(2.0));
    }

    #[test]
    fn test_severity_ignores_unknown_symptoms() {
        let t = tables();
        let symptoms = vec!["itching".to_string(), "purple_elephant".to_string()];
        assert_eq!(t.severity(&symptoms), Severity::Score(1.0));
    }

    #[test]
    fn test_severity_no_matches_is_unknown() {
        let t = tables();
        let symptoms = vec!["purple_elephant".to_string()];
        assert_eq!(t.severity(&symptoms), Severity::Unknown);
        assert_eq!(t.severity(&[]), Severity::Unknown);
    }

    #[test]
    fn test_duplicate_rows_keep_first() {
        let descriptions = "X,first\nX,second\n";
        let t = ReferenceTables::from_readers(
            descriptions.as_bytes(),
            "".as_bytes(),
            "".as_bytes(),
            "Disease\n".as_bytes(),
        )
        .unwrap();
        assert_eq!(t.description("X"), "first");
    }

    #[test]
    fn test_bad_severity_weight_errors() {
        let severities = "itching,not-a-number\n";
        let result = ReferenceTables::from_readers(
            "".as_bytes(),
            "".as_bytes(),
            severities.as_bytes(),
            "Disease\n".as_bytes(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let write = |name: &str, content: &str| {
            let path = dir.path().join(name);
            std::fs::write(&path, content).unwrap();
            path
        };

        let desc = write("desc.csv", DESCRIPTIONS);
        let prec = write("prec.csv", PRECAUTIONS);
        let sev = write("sev.csv", SEVERITIES);
        let comp = write("comp.csv", COMPLICATIONS);

        let t = ReferenceTables::load(&desc, &prec, &sev, &comp).unwrap();
        assert_eq!(t.description("Migraine"), "Recurrent headache disorder.");
    }

    #[test]
    fn test_load_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.csv");
        let result = ReferenceTables::load(&missing, &missing, &missing, &missing);
        assert!(result.is_err());
    }
}
