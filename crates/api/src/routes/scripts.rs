//! Route definitions for script endpoints.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::scripts;
use crate::state::AppState;

/// Script routes, mounted at the root.
///
/// All routes require the API key when one is configured (enforced by the
/// handler extractors).
///
/// ```text
/// POST   /generate           -> generate
/// POST   /generate-and-run   -> generate_and_run
/// POST   /run                -> run_script
/// POST   /get                -> get_script
/// POST   /delete             -> delete_script
/// GET    /list               -> list_scripts
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/generate", post(scripts::generate))
        .route("/generate-and-run", post(scripts::generate_and_run))
        .route("/run", post(scripts::run_script))
        .route("/get", post(scripts::get_script))
        .route("/delete", post(scripts::delete_script))
        .route("/list", get(scripts::list_scripts))
}
