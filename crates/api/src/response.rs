//! Shared response envelope for script operations.
//!
//! Every script endpoint answers `200 OK` with a `{ success, message, data }`
//! body, including when the operation itself failed. Callers must inspect
//! `success`; the HTTP status only reflects transport-level problems.

use buffer_core::error::CoreError;
use serde::Serialize;

/// Standard `{ "success", "message", "data" }` envelope.
///
/// `data` serializes as `null` when absent.
///
/// # Example
///
/// ```ignore
/// Json(Envelope::ok("File read.", ScriptContent { code }))
/// ```
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
}

impl<T: Serialize> Envelope<T> {
    /// Successful outcome carrying a payload.
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    /// Successful outcome without a payload.
    pub fn done(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }

    /// Failed outcome without a payload.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }

    /// Failed outcome that still carries a payload (partial results).
    pub fn failure_with(message: impl Into<String>, data: T) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: Some(data),
        }
    }
}

impl<T: Serialize> From<CoreError> for Envelope<T> {
    fn from(err: CoreError) -> Self {
        Self::failure(err.to_string())
    }
}
