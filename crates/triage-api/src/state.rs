//! Application state shared across all route handlers.
//!
//! AppState holds the startup-loaded, immutable collaborators plus the
//! session registry. It is passed to handlers via axum's State extractor.

use std::sync::Arc;
use std::time::Instant;

use triage_chat::Orchestrator;
use triage_core::TriageConfig;

use crate::sessions::SessionRegistry;

/// Shared application state.
///
/// All fields use `Arc` for cheap cloning across handler tasks. The only
/// mutable piece is the session registry, which guards itself.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<TriageConfig>,
    /// Conversation orchestrator (interpreter + prediction + lookups).
    pub orchestrator: Arc<Orchestrator>,
    /// Live streaming conversations.
    pub sessions: Arc<SessionRegistry>,
    /// Server start time for uptime calculation.
    pub start_time: Instant,
}

impl AppState {
    /// Create a new AppState around the startup-loaded components.
    pub fn new(config: Arc<TriageConfig>, orchestrator: Arc<Orchestrator>) -> Self {
        Self {
            config,
            orchestrator,
            sessions: Arc::new(SessionRegistry::new()),
            start_time: Instant::now(),
        }
    }
}
