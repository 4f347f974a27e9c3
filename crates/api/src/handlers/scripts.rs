//! Handlers for script generation, execution and management.
//!
//! Each handler delegates to the [`ScriptOrchestrator`] and answers with its
//! envelope. Only authentication and unreadable bodies produce non-200
//! responses.
//!
//! [`ScriptOrchestrator`]: crate::scripting::orchestrator::ScriptOrchestrator

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use buffer_core::types::{ExecutionResult, GenerationRequest, ScriptFile};
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::auth::RequireApiKey;
use crate::response::Envelope;
use crate::scripting::orchestrator::{GeneratedScript, PipelineOutcome, ScriptContent};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body naming an existing script.
#[derive(Debug, Deserialize)]
pub struct ScriptRequest {
    pub filename: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /generate
pub async fn generate(
    State(state): State<AppState>,
    _auth: RequireApiKey,
    body: Result<Json<GenerationRequest>, JsonRejection>,
) -> AppResult<Json<Envelope<GeneratedScript>>> {
    let Json(input) = body?;
    Ok(Json(state.orchestrator.generate(input).await))
}

/// POST /generate-and-run
///
/// Generate, save, then execute immediately.
pub async fn generate_and_run(
    State(state): State<AppState>,
    _auth: RequireApiKey,
    body: Result<Json<GenerationRequest>, JsonRejection>,
) -> AppResult<Json<Envelope<PipelineOutcome>>> {
    let Json(input) = body?;
    Ok(Json(state.orchestrator.generate_and_run(input).await))
}

/// POST /run
///
/// Execute an existing script.
pub async fn run_script(
    State(state): State<AppState>,
    _auth: RequireApiKey,
    body: Result<Json<ScriptRequest>, JsonRejection>,
) -> AppResult<Json<Envelope<ExecutionResult>>> {
    let Json(input) = body?;
    Ok(Json(state.orchestrator.run(&input.filename).await))
}

/// POST /get
pub async fn get_script(
    State(state): State<AppState>,
    _auth: RequireApiKey,
    body: Result<Json<ScriptRequest>, JsonRejection>,
) -> AppResult<Json<Envelope<ScriptContent>>> {
    let Json(input) = body?;
    Ok(Json(state.orchestrator.get(&input.filename).await))
}

/// POST /delete
pub async fn delete_script(
    State(state): State<AppState>,
    _auth: RequireApiKey,
    body: Result<Json<ScriptRequest>, JsonRejection>,
) -> AppResult<Json<Envelope<()>>> {
    let Json(input) = body?;
    Ok(Json(state.orchestrator.delete(&input.filename).await))
}

/// GET /list
pub async fn list_scripts(
    State(state): State<AppState>,
    _auth: RequireApiKey,
) -> Json<Envelope<Vec<ScriptFile>>> {
    Json(state.orchestrator.list().await)
}
