//! Pre-mutation template snapshots
//!
//! Before any stack update is submitted, the exact template body returned by
//! the remote system is written to disk. Files are write-once: the timestamp
//! in the name makes every invocation unique, and creation fails rather than
//! overwrite. The snapshots are never read back by this system; they exist
//! for operators to recover from.

#![deny(unsafe_code)]

use chrono::{SecondsFormat, Utc};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Errors raised while writing a snapshot; fatal for the stack in question,
/// no update may be submitted without one.
#[derive(Debug, Error)]
pub enum BackupError {
    #[error("failed to create backup directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write backup file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result type for backup operations
pub type Result<T> = std::result::Result<T, BackupError>;

/// Writes one snapshot per upgrade attempt into a fixed directory
#[derive(Debug, Clone)]
pub struct BackupWriter {
    dir: PathBuf,
}

impl BackupWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory the snapshots land in
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persist `raw` as `<stack_id>-<ISO8601>.json`, returning the path.
    ///
    /// The directory is created if absent; repeated calls are idempotent on
    /// that step. The file itself is created exclusively.
    pub async fn write(&self, stack_id: &str, raw: &str) -> Result<PathBuf> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| BackupError::CreateDir {
                path: self.dir.clone(),
                source,
            })?;

        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let path = self.dir.join(format!("{}-{}.json", stack_id, timestamp));

        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|source| BackupError::Write {
                path: path.clone(),
                source,
            })?;
        file.write_all(raw.as_bytes())
            .await
            .map_err(|source| BackupError::Write {
                path: path.clone(),
                source,
            })?;
        file.flush().await.map_err(|source| BackupError::Write {
            path: path.clone(),
            source,
        })?;

        debug!(stack_id = %stack_id, path = %path.display(), "wrote template snapshot");
        Ok(path)
    }
}
