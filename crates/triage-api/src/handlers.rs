//! Route handler functions for the single-shot surface.
//!
//! Each handler extracts its JSON body via axum extractors, calls into the
//! orchestrator, and returns a JSON response.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::state::AppState;

// =============================================================================
// Request / response types
// =============================================================================

/// Body of /response and /predict.
#[derive(Debug, Deserialize)]
pub struct UserInput {
    /// Client-side identifier; accepted for wire compatibility, unused.
    pub user_id: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageReply {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symptoms: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SymptomsResponse {
    pub symptoms: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
    pub active_sessions: usize,
}

// =============================================================================
// Handler functions
// =============================================================================

/// GET /start - the fixed opening message.
pub async fn start(State(state): State<AppState>) -> Json<MessageReply> {
    Json(MessageReply {
        message: state.orchestrator.greeting().to_string(),
        symptoms: None,
    })
}

/// POST /response - answer a yes/no gate message.
///
/// Unknown input asks again, a negative answer closes the conversation, an
/// affirmative answer returns the symptom universe with a selection prompt.
pub async fn respond(
    State(state): State<AppState>,
    Json(input): Json<UserInput>,
) -> Json<MessageReply> {
    let reply = state.orchestrator.respond(&input.message);
    Json(MessageReply {
        message: reply.message,
        symptoms: reply.symptoms,
    })
}

/// POST /predict - run the predict-and-enrich pipeline on a comma-separated
/// symptom list.
///
/// Failures are returned as `{"error": ...}` with HTTP 200 — an inherited
/// contract that existing consumers depend on, kept deliberately instead of
/// mapping to error status codes.
pub async fn predict(
    State(state): State<AppState>,
    Json(input): Json<UserInput>,
) -> Response {
    match state.orchestrator.diagnose(&input.message) {
        Ok(result) => Json(result).into_response(),
        Err(e) => {
            warn!(error = %e, "predict request failed");
            Json(ErrorEnvelope {
                error: e.to_string(),
            })
            .into_response()
        }
    }
}

/// GET /symptoms - the symptom universe in training-table column order.
pub async fn symptoms(State(state): State<AppState>) -> Json<SymptomsResponse> {
    Json(SymptomsResponse {
        symptoms: state.orchestrator.symptoms().to_vec(),
    })
}

/// GET /health - liveness plus a few cheap gauges.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        active_sessions: state.sessions.len(),
    })
}
