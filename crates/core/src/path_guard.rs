//! Filename validation and path mapping for the shared script directory.
//!
//! Every local path the relay touches is produced by [`ScriptPaths::resolve`].
//! Validation is by construction: any separator or parent segment is
//! rejected outright, nothing is canonicalized or prefix-compared.

use std::path::{Path, PathBuf};

use crate::error::CoreError;

/// Default mount point of the script directory inside the engine.
pub const DEFAULT_MOUNT_PREFIX: &str = "/automations";

/// Default upper bound on filename length, in characters.
pub const DEFAULT_MAX_FILENAME_LEN: usize = 100;

/// The two views of the script directory: the local path this relay reads
/// and the mount path the engine writes to.
#[derive(Debug, Clone)]
pub struct ScriptPaths {
    script_dir: PathBuf,
    mount_prefix: String,
    max_filename_len: usize,
}

impl ScriptPaths {
    pub fn new(
        script_dir: impl Into<PathBuf>,
        mount_prefix: impl Into<String>,
        max_filename_len: usize,
    ) -> Self {
        Self {
            script_dir: script_dir.into(),
            mount_prefix: mount_prefix.into(),
            max_filename_len,
        }
    }

    /// The local script directory.
    pub fn script_dir(&self) -> &Path {
        &self.script_dir
    }

    /// Check that `filename` is a bare name safe to join onto the script
    /// directory.
    pub fn validate(&self, filename: &str) -> Result<(), CoreError> {
        if filename.is_empty() {
            return Err(CoreError::InvalidPath("filename is empty".into()));
        }
        if filename.contains("..") || filename.contains('/') || filename.contains('\\') {
            return Err(CoreError::InvalidPath("path traversal detected".into()));
        }
        if filename.contains('\0') {
            return Err(CoreError::InvalidPath("filename contains a null byte".into()));
        }
        if filename.chars().count() > self.max_filename_len {
            return Err(CoreError::InvalidPath(format!(
                "filename exceeds {} characters",
                self.max_filename_len
            )));
        }
        Ok(())
    }

    /// Validate `filename` and join it onto the script directory.
    pub fn resolve(&self, filename: &str) -> Result<PathBuf, CoreError> {
        self.validate(filename)?;
        Ok(self.script_dir.join(filename))
    }

    /// Path of `filename` as seen from inside the engine.
    ///
    /// Pure string transform; callers validate first.
    pub fn remote_mount_path(&self, filename: &str) -> String {
        format!("{}/{filename}", self.mount_prefix.trim_end_matches('/'))
    }
}
