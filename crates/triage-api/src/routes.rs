//! Router setup with all API routes and middleware.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use triage_core::error::TriageError;

use crate::handlers;
use crate::state::AppState;
use crate::ws;

/// Create the axum Router with all routes and middleware.
///
/// CORS is wide open — the service fronts a browser client served from an
/// arbitrary origin and carries no credentials.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/start", get(handlers::start))
        .route("/response", post(handlers::respond))
        .route("/predict", post(handlers::predict))
        .route("/symptoms", get(handlers::symptoms))
        .route("/health", get(handlers::health))
        .route("/ws/chat", get(ws::ws_chat))
        .layer(DefaultBodyLimit::max(64 * 1024)) // 64KB; messages are short
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Start the HTTP server on the configured address.
///
/// Binds to 127.0.0.1 (localhost only) on the port from config.
pub async fn start_server(port: u16, state: AppState) -> Result<(), TriageError> {
    let addr = format!("127.0.0.1:{}", port);

    let router = create_router(state);

    tracing::info!("Starting API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| TriageError::Api(format!("Failed to bind {addr}: {e}")))?;

    axum::serve(listener, router)
        .await
        .map_err(|e| TriageError::Api(format!("Server error: {e}")))?;

    Ok(())
}
