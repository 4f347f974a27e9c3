#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::time::Duration;

use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, Response};
use axum::routing::{self, post};
use axum::{Json, Router};
use buffer_api::config::{EngineConfig, ScriptDirConfig, ServerConfig};
use buffer_api::router::build_app_router;
use buffer_api::state::AppState;
use buffer_engine::EngineTimeouts;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

/// Mount prefix the fake engine understands.
pub const MOUNT_PREFIX: &str = "/automations";

/// Build a test `ServerConfig` pointing at `script_dir` and `engine_url`.
///
/// Uses `http://localhost:5173` as CORS origin and short engine timeouts.
pub fn test_config(script_dir: &Path, engine_url: &str) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        api_key: None,
        default_model: "test-model".to_string(),
        engine: EngineConfig {
            url: engine_url.to_string(),
            api_key: None,
            timeouts: EngineTimeouts {
                generate: Duration::from_secs(5),
                execute: Duration::from_secs(5),
                health: Duration::from_millis(500),
            },
        },
        scripts: ScriptDirConfig {
            host_dir: script_dir.to_path_buf(),
            mount_path: MOUNT_PREFIX.to_string(),
            max_filename_length: 100,
        },
    }
}

/// Build the full application router with all middleware layers, exactly as
/// `main.rs` does.
pub fn build_test_app(config: ServerConfig) -> Router {
    let state = AppState::new(config.clone());
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Fake engine
// ---------------------------------------------------------------------------

/// Serve `router` on an ephemeral port and return its base URL.
pub async fn spawn_engine(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// A base URL nothing is listening on.
pub async fn dead_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

#[derive(Clone)]
struct FakeEngine {
    /// Host directory backing the engine's `/automations` mount.
    dir: PathBuf,
}

/// Generates `print(<prompt>)` and writes it through the simulated mount.
async fn fake_generate(State(engine): State<FakeEngine>, Json(body): Json<Value>) -> Json<Value> {
    let prompt = body["prompt"].as_str().unwrap_or_default();
    let code = format!("print({prompt:?})");
    let save_path = body["save_path"].as_str().unwrap_or_default();
    if let Some(name) = save_path.strip_prefix("/automations/") {
        std::fs::write(engine.dir.join(name), &code).unwrap();
    }
    Json(json!({
        "code": code,
        "model": body["model"],
        "save_path": save_path,
    }))
}

async fn fake_execute(Json(body): Json<Value>) -> Json<Value> {
    let code = body["code"].as_str().unwrap_or_default();
    Json(json!({
        "output": format!("executed: {code}"),
        "error": "",
    }))
}

/// A working engine whose mount is `dir`.
pub fn fake_engine(dir: &Path) -> Router {
    Router::new()
        .route("/generate", post(fake_generate))
        .route("/execute", post(fake_execute))
        .route("/health", routing::get(|| async { "ok" }))
        .with_state(FakeEngine {
            dir: dir.to_path_buf(),
        })
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header("Authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .header("Authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
