#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid filename: {0}")]
    InvalidPath(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Engine API error: {0}")]
    Remote(String),

    #[error("Error {action}: {source}")]
    Io {
        action: &'static str,
        #[source]
        source: std::io::Error,
    },
}

impl CoreError {
    /// Wrap an I/O error with the action that was being attempted
    /// (e.g. `"reading file"`).
    pub fn io(action: &'static str, source: std::io::Error) -> Self {
        Self::Io { action, source }
    }
}
