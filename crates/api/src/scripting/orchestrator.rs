//! Central script orchestrator service.
//!
//! Composes the path guard, filename synthesis, script storage and the engine
//! client into the relay's operations. Held in
//! [`AppState`](crate::state::AppState) as an `Arc<ScriptOrchestrator>`.
//!
//! Every operation returns an [`Envelope`]; no failure escapes as an error.

use buffer_core::error::CoreError;
use buffer_core::naming::{normalize_filename, synthesize_filename};
use buffer_core::storage::ScriptStore;
use buffer_core::types::{ExecutionResult, GenerationRequest, ScriptFile};
use buffer_engine::EngineClient;
use serde::Serialize;
use serde_json::Value;

use crate::response::Envelope;

/// Payload of a successful `generate`.
#[derive(Debug, Serialize)]
pub struct GeneratedScript {
    pub filename: String,
    pub code: String,
    /// Everything the engine returned.
    pub full_response: Value,
}

/// Payload of `generate-and-run`.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum PipelineOutcome {
    /// Both stages completed.
    Executed {
        filename: String,
        code: String,
        output: String,
        error: String,
    },
    /// Generation succeeded but execution did not; the code is kept.
    ExecutionFailed { code: String },
}

/// Payload of `get`.
#[derive(Debug, Serialize)]
pub struct ScriptContent {
    pub code: String,
}

/// Orchestrates generation and execution of scripts against the engine.
///
/// Stateless between calls: each request resolves its own filename, talks to
/// the engine and the script directory, and returns.
pub struct ScriptOrchestrator {
    engine: EngineClient,
    store: ScriptStore,
    default_model: String,
}

impl ScriptOrchestrator {
    pub fn new(engine: EngineClient, store: ScriptStore, default_model: String) -> Self {
        Self {
            engine,
            store,
            default_model,
        }
    }

    pub fn engine(&self) -> &EngineClient {
        &self.engine
    }

    /// Generate a script and have the engine save it into the script
    /// directory.
    pub async fn generate(&self, request: GenerationRequest) -> Envelope<GeneratedScript> {
        let filename = match self.target_filename(&request) {
            Ok(name) => name,
            Err(e) => return reject(e),
        };

        match self.request_generation(&request, &filename).await {
            Ok(generated) => {
                tracing::info!(filename = %filename, "Code generated");
                Envelope::ok(
                    "Code generated and saved.",
                    GeneratedScript {
                        filename,
                        code: generated.code,
                        full_response: generated.raw,
                    },
                )
            }
            Err(e) => reject(e),
        }
    }

    /// Generate a script, then execute the generated code immediately.
    ///
    /// 1. Resolve the target filename.
    /// 2. Generate (short-circuits on failure).
    /// 3. Execute the returned code. On failure the envelope still carries
    ///    the generated code.
    pub async fn generate_and_run(&self, request: GenerationRequest) -> Envelope<PipelineOutcome> {
        let filename = match self.target_filename(&request) {
            Ok(name) => name,
            Err(e) => return reject(e),
        };

        let generated = match self.request_generation(&request, &filename).await {
            Ok(generated) => generated,
            Err(e) => {
                tracing::warn!(filename = %filename, error = %e, "Generation stage failed");
                return Envelope::failure(format!("Generation failed: {e}"));
            }
        };
        let code = generated.code;

        match self.engine.execute(&code).await {
            Ok(ExecutionResult { output, error }) => {
                tracing::info!(filename = %filename, "Generated and executed");
                Envelope::ok(
                    "Generated and executed.",
                    PipelineOutcome::Executed {
                        filename,
                        code,
                        output,
                        error,
                    },
                )
            }
            Err(e) => {
                let e = CoreError::from(e);
                tracing::warn!(filename = %filename, error = %e, "Execution stage failed");
                Envelope::failure_with(
                    format!("Execution failed: {e}"),
                    PipelineOutcome::ExecutionFailed { code },
                )
            }
        }
    }

    /// Execute a script already present in the script directory.
    pub async fn run(&self, filename: &str) -> Envelope<ExecutionResult> {
        let code = match self.store.read(filename).await {
            Ok(code) => code,
            Err(e) => return reject(e),
        };

        match self.engine.execute(&code).await {
            Ok(result) => {
                tracing::info!(filename, "Script executed");
                Envelope::ok("Executed successfully.", result)
            }
            Err(e) => reject(e.into()),
        }
    }

    /// Return a script's source.
    pub async fn get(&self, filename: &str) -> Envelope<ScriptContent> {
        match self.store.read(filename).await {
            Ok(code) => Envelope::ok("File read.", ScriptContent { code }),
            Err(e) => reject(e),
        }
    }

    /// Delete a script. A missing file is reported as a failure.
    pub async fn delete(&self, filename: &str) -> Envelope<()> {
        match self.store.remove(filename).await {
            Ok(()) => {
                tracing::info!(filename, "Script deleted");
                Envelope::done(format!("Deleted {filename}"))
            }
            Err(e) => reject(e),
        }
    }

    /// List scripts in the directory, newest first.
    pub async fn list(&self) -> Envelope<Vec<ScriptFile>> {
        match self.store.list().await {
            Ok(files) => Envelope::ok("List retrieved.", files),
            Err(e) => reject(e),
        }
    }

    // ---- private helpers ----

    /// The explicit filename (with extension) or one synthesized from the
    /// prompt, validated either way. A blank explicit name counts as absent.
    fn target_filename(&self, request: &GenerationRequest) -> Result<String, CoreError> {
        let name = match request.filename.as_deref() {
            Some(name) if !name.trim().is_empty() => normalize_filename(name),
            _ => synthesize_filename(&request.prompt),
        };
        self.store.paths().validate(&name)?;
        Ok(name)
    }

    async fn request_generation(
        &self,
        request: &GenerationRequest,
        filename: &str,
    ) -> Result<buffer_engine::GenerateResponse, CoreError> {
        let save_path = self.store.paths().remote_mount_path(filename);
        let model = request.model.as_deref().unwrap_or(&self.default_model);
        tracing::debug!(filename, model, save_path = %save_path, "Requesting generation");

        Ok(self
            .engine
            .generate(&request.prompt, model, &save_path)
            .await?)
    }
}

/// Log a failed operation and wrap it in a failure envelope.
fn reject<T: Serialize>(err: CoreError) -> Envelope<T> {
    match &err {
        CoreError::Io { .. } => {
            tracing::error!(error = %err, "Script operation failed");
        }
        _ => tracing::warn!(error = %err, "Script operation rejected"),
    }
    err.into()
}
