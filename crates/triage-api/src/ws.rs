//! The streaming chat surface.
//!
//! Each connection registers a session, receives a greeting carrying its
//! conversation id, and then loops: one inbound comma-separated symptom list
//! per turn, one outbound JSON diagnostic (or a labeled plaintext error) per
//! turn. A processing failure never tears the connection down; only a client
//! close or a transport error ends the loop.

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::info;

use triage_core::types::{DiagnosticResult, Severity};

use crate::state::AppState;

/// Wire shape of one streamed diagnostic.
///
/// Recommendations stay off this surface; the streaming client only receives
/// the enrichment fields.
#[derive(Debug, Serialize, Deserialize)]
pub struct StreamDiagnostic {
    pub conversation_id: u64,
    pub prognosis: String,
    pub description: String,
    pub precautions: Vec<String>,
    pub complications: Vec<String>,
    pub severity: Severity,
}

impl StreamDiagnostic {
    fn new(conversation_id: u64, result: DiagnosticResult) -> Self {
        Self {
            conversation_id,
            prognosis: result.prognosis,
            description: result.description,
            precautions: result.precautions,
            complications: result.complications,
            severity: result.severity,
        }
    }
}

/// GET /ws/chat - WebSocket upgrade handler.
pub async fn ws_chat(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_chat(socket, state))
}

/// Main connection handler: register, greet, serve the diagnose loop,
/// unregister.
async fn handle_chat(socket: WebSocket, state: AppState) {
    let (mut ws_sink, mut ws_stream) = socket.split();
    let (tx, mut rx) = mpsc::channel::<String>(64);

    let conversation_id = state.sessions.register(tx);

    // Forwarder task: everything addressed to this session goes out through
    // one writer.
    let sender = tokio::spawn(async move {
        while let Some(text) = rx.recv().await {
            if ws_sink.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
        let _ = ws_sink.close().await;
    });

    state
        .sessions
        .send(
            conversation_id,
            format!("Connected! Your conversation ID is {conversation_id}."),
        )
        .await;

    while let Some(message) = ws_stream.next().await {
        match message {
            Ok(Message::Text(text)) => {
                let reply = process_message(&state, conversation_id, text.as_str());
                state.sessions.send(conversation_id, reply).await;
            }
            Ok(Message::Close(_)) | Err(_) => break,
            // Binary frames and pings are ignored; axum answers pings itself.
            Ok(_) => {}
        }
    }

    state.sessions.unregister(conversation_id);
    let _ = sender.await;
    info!(conversation_id, "chat connection closed");
}

/// Run one symptom list through the pipeline and render the outbound text.
///
/// Failures become a labeled plaintext message on the same channel; the
/// caller keeps the loop alive either way.
fn process_message(state: &AppState, conversation_id: u64, text: &str) -> String {
    let rendered = state
        .orchestrator
        .diagnose(text)
        .map_err(|e| e.to_string())
        .and_then(|result| {
            serde_json::to_string(&StreamDiagnostic::new(conversation_id, result))
                .map_err(|e| e.to_string())
        });

    match rendered {
        Ok(json) => json,
        Err(detail) => format!("Error processing message: {detail}"),
    }
}
