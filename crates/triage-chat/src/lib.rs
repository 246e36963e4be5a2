//! The conversational layer: yes/no intent interpretation and the
//! predict-and-enrich orchestrator behind both the single-shot and the
//! streaming surfaces.

pub mod error;
pub mod intent;
pub mod orchestrator;

pub use error::ChatError;
pub use intent::{Intent, IntentInterpreter};
pub use orchestrator::{BotReply, Orchestrator};
