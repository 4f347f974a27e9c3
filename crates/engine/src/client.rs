//! HTTP client for the remote generation/execution engine.
//!
//! Wraps the engine's `/generate`, `/execute` and `/health` endpoints using
//! [`reqwest`]. Every call carries its own timeout; nothing is retried.

use std::time::Duration;

use buffer_core::error::CoreError;
use buffer_core::types::ExecutionResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default budget for `/generate` (model inference is slow).
pub const DEFAULT_GENERATE_TIMEOUT: Duration = Duration::from_secs(120);
/// Default budget for `/execute`.
pub const DEFAULT_EXECUTE_TIMEOUT: Duration = Duration::from_secs(60);
/// Default budget for the `/health` probe.
pub const DEFAULT_HEALTH_TIMEOUT: Duration = Duration::from_secs(2);

/// Per-endpoint request timeouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineTimeouts {
    pub generate: Duration,
    pub execute: Duration,
    pub health: Duration,
}

impl Default for EngineTimeouts {
    fn default() -> Self {
        Self {
            generate: DEFAULT_GENERATE_TIMEOUT,
            execute: DEFAULT_EXECUTE_TIMEOUT,
            health: DEFAULT_HEALTH_TIMEOUT,
        }
    }
}

/// Errors from the engine HTTP layer.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The request did not complete within its budget.
    #[error("request to {endpoint} timed out after {}s", .timeout.as_secs_f64())]
    Timeout {
        endpoint: &'static str,
        timeout: Duration,
    },

    /// The HTTP request itself failed (network, DNS, TLS, body decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The engine returned a non-2xx status code.
    #[error("engine returned HTTP {status}: {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The engine answered with JSON of an unexpected shape.
    #[error("malformed engine response: {0}")]
    MalformedResponse(String),
}

impl From<EngineError> for CoreError {
    fn from(err: EngineError) -> Self {
        CoreError::Remote(err.to_string())
    }
}

/// Result of a `/generate` call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateResponse {
    /// Generated source code (empty if the engine returned none).
    pub code: String,
    /// The full JSON object the engine returned.
    pub raw: Value,
}

#[derive(Serialize)]
struct GeneratePayload<'a> {
    prompt: &'a str,
    model: &'a str,
    save_path: &'a str,
}

#[derive(Serialize)]
struct ExecutePayload<'a> {
    code: &'a str,
}

/// `/execute` answer; `null` and missing fields both mean empty.
#[derive(Deserialize)]
struct ExecuteReply {
    #[serde(default)]
    output: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// HTTP client for a single engine instance.
#[derive(Debug, Clone)]
pub struct EngineClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    timeouts: EngineTimeouts,
}

impl EngineClient {
    /// Create a new client.
    ///
    /// * `base_url` - e.g. `http://localhost:3000`.
    /// * `api_key` - sent as a bearer token when present.
    pub fn new(base_url: String, api_key: Option<String>, timeouts: EngineTimeouts) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, api_key, timeouts)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(
        client: reqwest::Client,
        base_url: String,
        api_key: Option<String>,
        timeouts: EngineTimeouts,
    ) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            timeouts,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Ask the engine to generate code for `prompt` and save it at
    /// `save_path` (a path inside the engine's mount).
    pub async fn generate(
        &self,
        prompt: &str,
        model: &str,
        save_path: &str,
    ) -> Result<GenerateResponse, EngineError> {
        let payload = GeneratePayload {
            prompt,
            model,
            save_path,
        };
        let raw = self
            .post("/generate", &payload, self.timeouts.generate)
            .await?;

        if !raw.is_object() {
            return Err(EngineError::MalformedResponse(
                "expected a JSON object from /generate".into(),
            ));
        }
        let code = match raw.get("code") {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(code)) => code.clone(),
            Some(_) => {
                return Err(EngineError::MalformedResponse(
                    "`code` is not a string".into(),
                ))
            }
        };

        Ok(GenerateResponse { code, raw })
    }

    /// Execute `code` in the engine's sandbox.
    pub async fn execute(&self, code: &str) -> Result<ExecutionResult, EngineError> {
        let raw = self
            .post("/execute", &ExecutePayload { code }, self.timeouts.execute)
            .await?;
        let reply: ExecuteReply = serde_json::from_value(raw)
            .map_err(|e| EngineError::MalformedResponse(e.to_string()))?;

        Ok(ExecutionResult {
            output: reply.output.unwrap_or_default(),
            error: reply.error.unwrap_or_default(),
        })
    }

    /// Check whether the engine answers at all.
    ///
    /// Any HTTP response counts as reachable, whatever its status.
    pub async fn probe(&self) -> bool {
        let request = self
            .authorize(self.client.get(self.url("/health")))
            .timeout(self.timeouts.health);
        match request.send().await {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!(error = %e, "Engine health probe failed");
                false
            }
        }
    }

    // ---- private helpers ----

    fn url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.base_url)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }

    /// POST a JSON payload and parse the JSON answer.
    async fn post<T: Serialize>(
        &self,
        endpoint: &'static str,
        payload: &T,
        timeout: Duration,
    ) -> Result<Value, EngineError> {
        tracing::debug!(endpoint, timeout_secs = timeout.as_secs(), "Calling engine");

        let request = self
            .authorize(self.client.post(self.url(endpoint)))
            .json(payload)
            .timeout(timeout);

        let response = request
            .send()
            .await
            .map_err(|e| Self::classify(e, endpoint, timeout))?;
        let response = Self::ensure_success(response).await?;
        response
            .json::<Value>()
            .await
            .map_err(|e| Self::classify(e, endpoint, timeout))
    }

    fn classify(err: reqwest::Error, endpoint: &'static str, timeout: Duration) -> EngineError {
        if err.is_timeout() {
            EngineError::Timeout { endpoint, timeout }
        } else {
            EngineError::Request(err)
        }
    }

    /// Return the response unchanged on 2xx, or an
    /// [`EngineError::ApiError`] with the status and body text.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, EngineError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(EngineError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}
