use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Human-readable service name reported by the health check.
pub const SERVICE_NAME: &str = "Script Buffer Relay";

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status (always `"ok"` when the relay answers).
    pub status: &'static str,
    pub service: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// `"connected"` or `"disconnected"`, from a short probe of the engine.
    pub docker_api: &'static str,
}

/// GET /health -- returns relay status and engine reachability.
///
/// Never fails: an unreachable engine is reported, not propagated.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let engine_reachable = state.orchestrator.engine().probe().await;

    Json(HealthResponse {
        status: "ok",
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        docker_api: if engine_reachable {
            "connected"
        } else {
            "disconnected"
        },
    })
}

/// Mount health check routes. Unauthenticated.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
