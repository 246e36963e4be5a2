//! Triage API crate - axum HTTP server, route handlers, WebSocket chat.
//!
//! Provides the single-shot REST surface (/start, /response, /predict,
//! /symptoms, /health) and the streaming chat surface (/ws/chat), plus the
//! session registry that addresses live streaming connections.

pub mod handlers;
pub mod routes;
pub mod sessions;
pub mod state;
pub mod ws;

pub use routes::create_router;
pub use sessions::SessionRegistry;
pub use state::AppState;
