use std::sync::Arc;

use buffer_core::storage::ScriptStore;
use buffer_engine::EngineClient;

use crate::config::ServerConfig;
use crate::scripting::orchestrator::ScriptOrchestrator;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration (read by the auth extractor).
    pub config: Arc<ServerConfig>,
    /// Script orchestrator (engine client + script directory).
    pub orchestrator: Arc<ScriptOrchestrator>,
}

impl AppState {
    /// Build the state from configuration, wiring the engine client and
    /// script store.
    pub fn new(config: ServerConfig) -> Self {
        let engine = EngineClient::new(
            config.engine.url.clone(),
            config.engine.api_key.clone(),
            config.engine.timeouts,
        );
        let store = ScriptStore::new(config.script_paths());
        let orchestrator = ScriptOrchestrator::new(engine, store, config.default_model.clone());

        Self {
            config: Arc::new(config),
            orchestrator: Arc::new(orchestrator),
        }
    }
}
