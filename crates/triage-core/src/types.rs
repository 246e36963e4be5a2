//! Shared domain types: severity scores, diagnostic results, recommendations.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Mean severity of a symptom set.
///
/// `Unknown` is the sentinel for "none of the supplied symptoms appear in
/// the severity table". On the wire this serializes as a string: scores are
/// formatted with two decimals, the sentinel as `"Unknown"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Severity {
    Score(f64),
    Unknown,
}

impl Severity {
    /// The numeric score, if one was computed.
    pub fn score(&self) -> Option<f64> {
        match self {
            Severity::Score(s) => Some(*s),
            Severity::Unknown => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Score(s) => write!(f, "{:.2}", s),
            Severity::Unknown => write!(f, "Unknown"),
        }
    }
}

impl From<Severity> for String {
    fn from(severity: Severity) -> Self {
        severity.to_string()
    }
}

impl TryFrom<String> for Severity {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value == "Unknown" {
            return Ok(Severity::Unknown);
        }
        value
            .parse::<f64>()
            .map(Severity::Score)
            .map_err(|_| format!("invalid severity value: {value}"))
    }
}

/// Urgency classification derived from the mean severity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub urgency: String,
    pub specialist: String,
}

impl Recommendation {
    /// Classify a severity against the urgency threshold.
    ///
    /// An unknown severity degrades to a general consultation rather than
    /// failing the request.
    pub fn for_severity(severity: &Severity, urgency_threshold: f64) -> Self {
        match severity {
            Severity::Score(s) if *s > urgency_threshold => Self {
                urgency: "Urgent".to_string(),
                specialist: "Emergency Specialist".to_string(),
            },
            _ => Self {
                urgency: "General Consultation".to_string(),
                specialist: "General Practitioner".to_string(),
            },
        }
    }
}

/// The enriched outcome of one prediction.
///
/// Constructed fresh per request, never cached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticResult {
    /// Disease label returned by the classifier.
    pub prognosis: String,
    pub description: String,
    pub precautions: Vec<String>,
    pub complications: Vec<String>,
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Recommendation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_display_two_decimals() {
        assert_eq!(Severity::Score(4.0).to_string(), "4.00");
        assert_eq!(Severity::Score(3.333333).to_string(), "3.33");
        assert_eq!(Severity::Unknown.to_string(), "Unknown");
    }

    #[test]
    fn test_severity_serializes_as_string() {
        let json = serde_json::to_string(&Severity::Score(4.5)).unwrap();
        assert_eq!(json, "\"4.50\"");

        let json = serde_json::to_string(&Severity::Unknown).unwrap();
        assert_eq!(json, "\"Unknown\"");
    }

    #[test]
    fn test_severity_deserializes_from_string() {
        let severity: Severity = serde_json::from_str("\"4.50\"").unwrap();
        assert_eq!(severity, Severity::Score(4.5));

        let severity: Severity = serde_json::from_str("\"Unknown\"").unwrap();
        assert_eq!(severity, Severity::Unknown);

        let err: Result<Severity, _> = serde_json::from_str("\"very bad\"");
        assert!(err.is_err());
    }

    #[test]
    fn test_recommendation_above_threshold_is_urgent() {
        let rec = Recommendation::for_severity(&Severity::Score(4.2), 3.0);
        assert_eq!(rec.urgency, "Urgent");
        assert_eq!(rec.specialist, "Emergency Specialist");
    }

    #[test]
    fn test_recommendation_at_threshold_is_general() {
        // The threshold itself is not urgent; only strictly greater is.
        let rec = Recommendation::for_severity(&Severity::Score(3.0), 3.0);
        assert_eq!(rec.urgency, "General Consultation");
        assert_eq!(rec.specialist, "General Practitioner");
    }

    #[test]
    fn test_recommendation_unknown_severity_is_general() {
        let rec = Recommendation::for_severity(&Severity::Unknown, 3.0);
        assert_eq!(rec.urgency, "General Consultation");
        assert_eq!(rec.specialist, "General Practitioner");
    }

    #[test]
    fn test_diagnostic_result_omits_missing_recommendations() {
        let result = DiagnosticResult {
            prognosis: "Fungal infection".to_string(),
            description: "A fungal infection of the skin.".to_string(),
            precautions: vec!["keep the area dry".to_string()],
            complications: vec!["No known complications.".to_string()],
            severity: Severity::Unknown,
            recommendations: None,
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["prognosis"], "Fungal infection");
        assert_eq!(json["severity"], "Unknown");
        assert!(json.get("recommendations").is_none());
    }

    #[test]
    fn test_diagnostic_result_round_trip() {
        let result = DiagnosticResult {
            prognosis: "Migraine".to_string(),
            description: "Recurrent headache disorder.".to_string(),
            precautions: vec!["rest in a dark room".to_string()],
            complications: vec!["status migrainosus".to_string()],
            severity: Severity::Score(4.25),
            recommendations: Some(Recommendation::for_severity(&Severity::Score(4.25), 3.0)),
        };

        let json = serde_json::to_string(&result).unwrap();
        let back: DiagnosticResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back.prognosis, "Migraine");
        assert_eq!(back.severity, Severity::Score(4.25));
        assert_eq!(back.recommendations.unwrap().urgency, "Urgent");
    }
}
