//! Conversation orchestrator: sequences the "ask yes/no → collect symptoms →
//! predict → enrich → reply" flow for both entry surfaces.
//!
//! The orchestrator holds no per-conversation state. The yes/no gate and the
//! prediction step are independent: callers of [`Orchestrator::diagnose`] are
//! trusted to have already passed the gate.

use std::sync::Arc;

use tracing::debug;

use triage_core::config::ChatConfig;
use triage_core::types::{DiagnosticResult, Recommendation};
use triage_data::ReferenceTables;
use triage_model::PredictionAdapter;

use crate::error::ChatError;
use crate::intent::{Intent, IntentInterpreter};

/// Opening message for both surfaces.
pub const GREETING: &str = "Hi, I am your medical assistant. Can I help you with a diagnostic?";

const CLARIFY: &str = "Sorry, I didn't understand. Please respond with 'yes' or 'no'.";
const GOODBYE: &str = "Ok, have a nice day!";
const SYMPTOM_PROMPT: &str =
    "Please select symptoms from the list below and provide them comma-separated.";

/// Reply to a gate-stage message. `symptoms` is populated only on an
/// affirmative answer.
#[derive(Debug, Clone, PartialEq)]
pub struct BotReply {
    pub message: String,
    pub symptoms: Option<Vec<String>>,
}

/// Coordinates the interpreter, the prediction adapter, and the lookup
/// tables.
pub struct Orchestrator {
    interpreter: IntentInterpreter,
    tables: Arc<ReferenceTables>,
    adapter: PredictionAdapter,
    config: ChatConfig,
}

impl Orchestrator {
    pub fn new(tables: Arc<ReferenceTables>, adapter: PredictionAdapter, config: ChatConfig) -> Self {
        Self {
            interpreter: IntentInterpreter::new(),
            tables,
            adapter,
            config,
        }
    }

    /// The fixed opening message.
    pub fn greeting(&self) -> &'static str {
        GREETING
    }

    /// The full symptom universe, in training-table column order.
    pub fn symptoms(&self) -> &[String] {
        self.adapter.universe().symptoms()
    }

    /// Answer a gate-stage message: ask again on unknown, close on negative,
    /// hand over the symptom list on affirmative.
    pub fn respond(&self, message: &str) -> BotReply {
        match self.interpreter.interpret(message.trim()) {
            Intent::Unknown => BotReply {
                message: CLARIFY.to_string(),
                symptoms: None,
            },
            Intent::Negative => BotReply {
                message: GOODBYE.to_string(),
                symptoms: None,
            },
            Intent::Affirmative => BotReply {
                message: SYMPTOM_PROMPT.to_string(),
                symptoms: Some(self.symptoms().to_vec()),
            },
        }
    }

    /// Run the full predict-and-enrich pipeline on a comma-separated symptom
    /// list.
    ///
    /// Names are trimmed; names outside the universe are silently ignored.
    /// Severity is averaged over the supplied names found in the severity
    /// table, independent of universe membership.
    pub fn diagnose(&self, message: &str) -> Result<DiagnosticResult, ChatError> {
        if message.len() > self.config.max_message_length {
            return Err(ChatError::MessageTooLong(self.config.max_message_length));
        }

        let symptoms: Vec<String> = message.split(',').map(|s| s.trim().to_string()).collect();

        let prognosis = self.adapter.predict(&symptoms)?;
        let severity = self.tables.severity(&symptoms);
        let recommendations = Recommendation::for_severity(&severity, self.config.urgency_threshold);

        debug!(prognosis = %prognosis, severity = %severity, "diagnosis assembled");

        Ok(DiagnosticResult {
            description: self.tables.description(&prognosis),
            precautions: self.tables.precautions(&prognosis),
            complications: self.tables.complications(&prognosis),
            severity,
            recommendations: Some(recommendations),
            prognosis,
        })
    }
}
