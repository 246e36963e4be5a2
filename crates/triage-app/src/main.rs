//! Triage application binary - composition root.
//!
//! Ties together all triage crates into a single executable:
//! 1. Parse CLI arguments and initialize tracing
//! 2. Load configuration from TOML
//! 3. Load the symptom universe, reference tables, and the serialized model
//!    (any failure here is fatal — the process must not serve traffic)
//! 4. Build the orchestrator and shared state
//! 5. Start the axum server (HTTP + WebSocket)

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;

use triage_api::{routes, AppState};
use triage_chat::Orchestrator;
use triage_core::TriageConfig;
use triage_data::{ReferenceTables, SymptomUniverse};
use triage_model::{ForestClassifier, PredictionAdapter};

mod cli;
use cli::CliArgs;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Tracing. CLI level wins over RUST_LOG, which wins over "info".
    let default_level = args.resolve_log_level().unwrap_or_default();
    tracing_subscriber::fmt()
        .with_env_filter(if default_level.is_empty() {
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
        } else {
            tracing_subscriber::EnvFilter::new(default_level)
        })
        .init();

    tracing::info!("Starting triage v{}", env!("CARGO_PKG_VERSION"));

    // Config.
    let config_file = args.resolve_config_path();
    let mut config = TriageConfig::load_or_default(&config_file);
    if let Some(dir) = args.resolve_data_dir() {
        config.general.data_dir = dir;
    }
    let port = args.resolve_port(config.general.port);

    // Startup-fatal loading: universe, tables, model. Nothing is served
    // until all three are in memory.
    let data_dir = PathBuf::from(&config.general.data_dir);

    let universe = match SymptomUniverse::load(&data_dir.join(&config.data.training_file)) {
        Ok(u) => Arc::new(u),
        Err(e) => {
            tracing::error!(error = %e, "failed to load the symptom universe");
            return Err(e.into());
        }
    };

    let tables = match load_tables(&data_dir, &config) {
        Ok(t) => Arc::new(t),
        Err(e) => {
            tracing::error!(error = %e, "failed to load the reference tables");
            return Err(e.into());
        }
    };

    let model_path = data_dir.join(&config.data.model_file);
    let classifier = match ForestClassifier::load(&model_path) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(path = %model_path.display(), error = %e, "failed to load the model");
            return Err(e.into());
        }
    };

    let adapter = PredictionAdapter::new(Arc::clone(&universe), Box::new(classifier))?;

    tracing::info!(
        symptoms = universe.len(),
        "symptom universe and model agree on feature count"
    );

    // Shared state.
    let orchestrator = Arc::new(Orchestrator::new(tables, adapter, config.chat.clone()));
    let state = AppState::new(Arc::new(config), orchestrator);

    // Serve. Bind failure usually means another instance holds the port.
    if let Err(e) = routes::start_server(port, state).await {
        tracing::error!(error = %e, "server exited");
        tracing::error!("Try: TRIAGE_PORT={} triage", port + 1);
        return Err(e.into());
    }

    Ok(())
}

fn load_tables(data_dir: &Path, config: &TriageConfig) -> triage_core::Result<ReferenceTables> {
    ReferenceTables::load(
        &data_dir.join(&config.data.description_file),
        &data_dir.join(&config.data.precaution_file),
        &data_dir.join(&config.data.severity_file),
        &data_dir.join(&config.data.complications_file),
    )
}
