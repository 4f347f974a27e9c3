//! Filesystem access to the shared script directory.
//!
//! [`ScriptStore`] only ever touches paths produced by
//! [`ScriptPaths::resolve`], so no operation can reach outside the directory.
//! The relay never writes scripts itself; the engine does, through its mount.

use std::io::ErrorKind;

use chrono::{DateTime, Utc};

use crate::error::CoreError;
use crate::naming::SCRIPT_EXTENSION;
use crate::path_guard::ScriptPaths;
use crate::types::ScriptFile;

/// Read, delete and list scripts in the configured directory.
#[derive(Debug, Clone)]
pub struct ScriptStore {
    paths: ScriptPaths,
}

impl ScriptStore {
    pub fn new(paths: ScriptPaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &ScriptPaths {
        &self.paths
    }

    /// Read a script as UTF-8 text.
    ///
    /// A missing file is [`CoreError::NotFound`]; any other failure is
    /// [`CoreError::Io`].
    pub async fn read(&self, filename: &str) -> Result<String, CoreError> {
        let path = self.paths.resolve(filename)?;
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => CoreError::NotFound(filename.to_string()),
                _ => CoreError::io("reading file", e),
            })
    }

    /// Delete a script. Deleting a file that does not exist is an error.
    pub async fn remove(&self, filename: &str) -> Result<(), CoreError> {
        let path = self.paths.resolve(filename)?;
        tokio::fs::remove_file(&path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => CoreError::NotFound(filename.to_string()),
                _ => CoreError::io("deleting file", e),
            })
    }

    /// List scripts in the directory (non-recursive), newest first.
    ///
    /// A missing directory yields an empty list. A failure to stat any
    /// single entry fails the whole listing.
    pub async fn list(&self) -> Result<Vec<ScriptFile>, CoreError> {
        let dir = self.paths.script_dir();
        let mut entries = match tokio::fs::read_dir(dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(dir = %dir.display(), "Script directory does not exist");
                return Ok(Vec::new());
            }
            Err(e) => return Err(CoreError::io("listing files", e)),
        };

        let mut files = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| CoreError::io("listing files", e))?
        {
            let Ok(filename) = entry.file_name().into_string() else {
                tracing::debug!(path = %entry.path().display(), "Skipping non-UTF-8 entry");
                continue;
            };
            if !filename.ends_with(SCRIPT_EXTENSION) {
                continue;
            }

            // Follow symlinks, like stat(2).
            let metadata = tokio::fs::metadata(entry.path())
                .await
                .map_err(|e| CoreError::io("listing files", e))?;
            let modified = metadata
                .modified()
                .map_err(|e| CoreError::io("listing files", e))?;

            files.push(ScriptFile {
                filename,
                size: metadata.len(),
                modified: DateTime::<Utc>::from(modified),
            });
        }

        files.sort_by(|a, b| b.modified.cmp(&a.modified));
        Ok(files)
    }
}
