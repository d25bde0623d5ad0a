//! In-memory implementation of the storage gateway.
//!
//! Keeps the last saved document as serialized JSON, so reads go through
//! the same codec as the file store. Used by tests and dry runs.

use super::{AppState, StateStore, StorageError, StorageResult};
use std::io;
use std::path::PathBuf;

const MEMORY_PATH: &str = "<memory>";

#[derive(Debug, Default)]
pub struct MemoryStore {
    document: Option<String>,
    save_count: usize,
    fail_saves: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an already persisted raw document.
    pub fn with_document(document: impl Into<String>) -> Self {
        Self {
            document: Some(document.into()),
            ..Self::default()
        }
    }

    /// Last saved raw document, if any.
    pub fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.save_count
    }

    /// Makes subsequent saves fail with an I/O error.
    pub fn set_fail_saves(&mut self, fail: bool) {
        self.fail_saves = fail;
    }
}

impl StateStore for MemoryStore {
    fn load(&self) -> StorageResult<AppState> {
        match self.document.as_deref() {
            None => Ok(AppState::default()),
            Some(raw) => serde_json::from_str(raw).map_err(|source| StorageError::Malformed {
                path: PathBuf::from(MEMORY_PATH),
                source,
            }),
        }
    }

    fn save(&mut self, state: &AppState) -> StorageResult<()> {
        if self.fail_saves {
            return Err(StorageError::Io {
                path: PathBuf::from(MEMORY_PATH),
                source: io::Error::other("memory store configured to fail saves"),
            });
        }
        self.document = Some(serde_json::to_string(state).map_err(StorageError::Serialize)?);
        self.save_count += 1;
        Ok(())
    }
}
