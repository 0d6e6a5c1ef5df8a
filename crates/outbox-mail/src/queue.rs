//! Durable queue collaborator seam and the file-backed spool.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use outbox_core::{TaskError, TaskResult};

use crate::process::ProcessResult;

/// Persists messages for delivery at a later time.
///
/// The dispatcher invokes the queue only as the fallback for a delivery
/// failure, at most once per dispatch, and never inspects its durability
/// guarantees. A queue that fails here surfaces its error through the
/// dispatch future unchanged.
pub trait EmailQueue: Send + Sync {
    /// Store `message` for later delivery.
    fn persist_for_later(&self, message: &str) -> TaskResult<ProcessResult>;
}

/// Errors raised by spool housekeeping.
#[derive(Debug, thiserror::Error)]
pub enum SpoolError {
    /// Failed to serialize or parse an entry document.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem access failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<SpoolError> for TaskError {
    fn from(error: SpoolError) -> Self {
        TaskError::unknown(error.to_string())
    }
}

/// One spooled message document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpoolEntry {
    /// Entry id, also the file stem on disk.
    pub id: Uuid,
    /// The message body as handed to the dispatcher.
    pub body: String,
}

/// File-backed [`EmailQueue`] storing one JSON document per message.
pub struct FileSpool {
    spool_dir: PathBuf,
}

impl FileSpool {
    /// Open a spool rooted at `spool_dir`, creating the directory if needed.
    pub fn new(spool_dir: impl AsRef<Path>) -> Result<Self, SpoolError> {
        let spool_dir = spool_dir.as_ref().to_path_buf();
        fs::create_dir_all(&spool_dir)?;
        Ok(Self { spool_dir })
    }

    /// Store a message body; returns the new entry's id.
    pub fn store(&self, body: &str) -> Result<Uuid, SpoolError> {
        let entry = SpoolEntry {
            id: Uuid::new_v4(),
            body: body.to_string(),
        };
        let document = serde_json::to_vec_pretty(&entry)?;
        fs::write(self.entry_path(entry.id), document)?;

        tracing::info!("spooled message {} for later delivery", entry.id);
        Ok(entry.id)
    }

    /// List every entry currently on disk.
    ///
    /// Unreadable documents are skipped with a warning rather than failing
    /// the whole listing.
    pub fn pending(&self) -> Result<Vec<SpoolEntry>, SpoolError> {
        let mut entries = Vec::new();
        for dirent in fs::read_dir(&self.spool_dir)? {
            let path = dirent?.path();
            if !path.extension().is_some_and(|ext| ext == "json") {
                continue;
            }

            let parsed: Result<SpoolEntry, SpoolError> = fs::read(&path)
                .map_err(SpoolError::from)
                .and_then(|bytes| serde_json::from_slice(&bytes).map_err(SpoolError::from));
            match parsed {
                Ok(entry) => entries.push(entry),
                Err(error) => {
                    tracing::warn!("skipping unreadable spool entry {}: {error}", path.display());
                }
            }
        }
        Ok(entries)
    }

    /// Remove an entry once it has been delivered.
    pub fn remove(&self, id: Uuid) -> Result<(), SpoolError> {
        fs::remove_file(self.entry_path(id))?;
        Ok(())
    }

    fn entry_path(&self, id: Uuid) -> PathBuf {
        self.spool_dir.join(format!("{id}.json"))
    }
}

impl EmailQueue for FileSpool {
    fn persist_for_later(&self, message: &str) -> TaskResult<ProcessResult> {
        self.store(message)?;
        Ok(ProcessResult::Success)
    }
}
