use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A script stored in the shared script directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptFile {
    /// Bare file name, always ending in [`SCRIPT_EXTENSION`](crate::naming::SCRIPT_EXTENSION).
    pub filename: String,
    /// Size on disk in bytes.
    pub size: u64,
    /// Last modification time.
    pub modified: DateTime<Utc>,
}

/// A request to generate a script from a prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Free-text description of the script to generate.
    pub prompt: String,
    /// Model identifier; the configured default model when `None`.
    #[serde(default)]
    pub model: Option<String>,
    /// Target filename; synthesized from the prompt when `None`.
    #[serde(default)]
    pub filename: Option<String>,
}

/// Output of a single engine execution.
///
/// Both fields may be populated at once: the engine can emit partial output
/// before failing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    #[serde(default)]
    pub output: String,
    #[serde(default)]
    pub error: String,
}
