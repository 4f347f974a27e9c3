use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use buffer_core::path_guard::{ScriptPaths, DEFAULT_MAX_FILENAME_LEN, DEFAULT_MOUNT_PREFIX};
use buffer_engine::EngineTimeouts;

/// Error raised when an environment variable holds an unusable value.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} must be a valid {expected}, got {value:?}")]
    Invalid {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Connection settings for the remote engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Base URL, e.g. `http://localhost:3000`.
    pub url: String,
    /// Bearer token sent to the engine, if any.
    pub api_key: Option<String>,
    /// Per-endpoint request budgets.
    pub timeouts: EngineTimeouts,
}

/// Location of the shared script directory.
#[derive(Debug, Clone)]
pub struct ScriptDirConfig {
    /// Directory as seen by this relay.
    pub host_dir: PathBuf,
    /// Same directory as mounted inside the engine.
    pub mount_path: String,
    /// Longest filename accepted from clients.
    pub max_filename_length: usize,
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development. The variable
/// names match the `.env` file the control panel edits.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `300`). Must exceed the
    /// generate and execute budgets combined.
    pub request_timeout_secs: u64,
    /// Token clients must present as `Authorization: Bearer`; `None` disables auth.
    pub api_key: Option<String>,
    /// Model used when a request does not name one.
    pub default_model: String,
    pub engine: EngineConfig,
    pub scripts: ScriptDirConfig,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                        | Default                 |
    /// |--------------------------------|-------------------------|
    /// | `HOST`                         | `0.0.0.0`               |
    /// | `BUFFER_PORT`                  | `8000`                  |
    /// | `CORS_ORIGINS`                 | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`         | `300`                   |
    /// | `BUFFER_API_KEY`               | unset                   |
    /// | `AUTOMATION_API_URL`           | `http://localhost:3000` |
    /// | `AUTOMATION_API_KEY`           | unset                   |
    /// | `AUTOMATIONS_HOST_DIR`         | `./automations`         |
    /// | `AUTOMATIONS_MOUNT_PATH`       | `/automations`          |
    /// | `DEFAULT_MODEL`                | `deepseek-coder:6.7b`   |
    /// | `MAX_FILENAME_LENGTH`          | `100`                   |
    /// | `ENGINE_GENERATE_TIMEOUT_SECS` | `120`                   |
    /// | `ENGINE_EXECUTE_TIMEOUT_SECS`  | `60`                    |
    /// | `ENGINE_HEALTH_TIMEOUT_SECS`   | `2`                     |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_or(&lookup, "BUFFER_PORT", 8000u16, "u16")?;

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs = parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 300u64, "u64")?;

        let defaults = EngineTimeouts::default();
        let timeouts = EngineTimeouts {
            generate: Duration::from_secs(parse_or(
                &lookup,
                "ENGINE_GENERATE_TIMEOUT_SECS",
                defaults.generate.as_secs(),
                "u64",
            )?),
            execute: Duration::from_secs(parse_or(
                &lookup,
                "ENGINE_EXECUTE_TIMEOUT_SECS",
                defaults.execute.as_secs(),
                "u64",
            )?),
            health: Duration::from_secs(parse_or(
                &lookup,
                "ENGINE_HEALTH_TIMEOUT_SECS",
                defaults.health.as_secs(),
                "u64",
            )?),
        };

        let engine = EngineConfig {
            url: lookup("AUTOMATION_API_URL").unwrap_or_else(|| "http://localhost:3000".into()),
            api_key: non_empty(&lookup, "AUTOMATION_API_KEY"),
            timeouts,
        };

        let scripts = ScriptDirConfig {
            host_dir: lookup("AUTOMATIONS_HOST_DIR")
                .unwrap_or_else(|| "./automations".into())
                .into(),
            mount_path: lookup("AUTOMATIONS_MOUNT_PATH")
                .unwrap_or_else(|| DEFAULT_MOUNT_PREFIX.into()),
            max_filename_length: parse_or(
                &lookup,
                "MAX_FILENAME_LENGTH",
                DEFAULT_MAX_FILENAME_LEN,
                "usize",
            )?,
        };

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            api_key: non_empty(&lookup, "BUFFER_API_KEY"),
            default_model: lookup("DEFAULT_MODEL")
                .unwrap_or_else(|| "deepseek-coder:6.7b".into()),
            engine,
            scripts,
        })
    }

    /// Path guard for the configured script directory.
    pub fn script_paths(&self) -> ScriptPaths {
        ScriptPaths::new(
            self.scripts.host_dir.clone(),
            self.scripts.mount_path.clone(),
            self.scripts.max_filename_length,
        )
    }
}

/// A variable that counts as unset when empty.
fn non_empty(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key).filter(|v| !v.trim().is_empty())
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError> {
    match lookup(key) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            key,
            value,
            expected,
        }),
    }
}
