pub mod health;
pub mod scripts;

use axum::Router;

use crate::state::AppState;

/// Build the script route tree.
///
/// Route hierarchy:
///
/// ```text
/// /generate                generate a script (POST)
/// /generate-and-run        generate then execute (POST)
/// /run                     execute a stored script (POST)
/// /get                     read a stored script (POST)
/// /delete                  delete a stored script (POST)
/// /list                    list stored scripts (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(scripts::router())
}
