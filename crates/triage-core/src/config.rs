use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Result, TriageError};

/// Top-level configuration for the triage service.
///
/// Loaded from `~/.triage/config.toml` by default. Each section corresponds
/// to a bounded context or cross-cutting concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriageConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub chat: ChatConfig,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            data: DataConfig::default(),
            chat: ChatConfig::default(),
        }
    }
}

impl TriageConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: TriageConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| TriageError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Directory holding the reference tables and the serialized model.
    pub data_dir: String,
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
    /// API server port.
    pub port: u16,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: "data".to_string(),
            log_level: "info".to_string(),
            port: 8000,
        }
    }
}

/// Locations of the startup-loaded data files, relative to `data_dir`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Training table; its header defines the symptom universe.
    pub training_file: String,
    /// Disease descriptions (headerless, two columns).
    pub description_file: String,
    /// Disease precautions (headerless, disease plus up to four precautions).
    pub precaution_file: String,
    /// Symptom severity weights (headerless, symptom and weight).
    pub severity_file: String,
    /// Disease complications (headered).
    pub complications_file: String,
    /// Serialized decision-forest model.
    pub model_file: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            training_file: "training.csv".to_string(),
            description_file: "symptom_description.csv".to_string(),
            precaution_file: "symptom_precaution.csv".to_string(),
            severity_file: "symptom_severity.csv".to_string(),
            complications_file: "disease_complications.csv".to_string(),
            model_file: "disease_model.json".to_string(),
        }
    }
}

/// Conversation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Mean severity above this value is classified as urgent.
    pub urgency_threshold: f64,
    /// Maximum inbound message length in characters.
    pub max_message_length: usize,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            urgency_threshold: 3.0,
            max_message_length: 2000,
        }
    }
}
