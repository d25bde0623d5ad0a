//! Full-state persistence boundary.
//!
//! # Responsibility
//! - Define the persisted application state document.
//! - Load and save that document through the `StateStore` contract.
//!
//! # Invariants
//! - A missing document is an empty state, never an error.
//! - A present but unparsable document is an error; callers must not
//!   overwrite it with defaults.
//! - Missing fields read as their defaults (forward-compatible reads).

use crate::model::points::PointsLedger;
use crate::repo::entry_store::EntryStore;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod json_file;
mod memory;

pub use json_file::{JsonFileStore, DEFAULT_DATA_PATH};
pub use memory::MemoryStore;

pub type StorageResult<T> = Result<T, StorageError>;

/// Everything persisted between sessions.
///
/// Wire shape: `{"notes": [...], "todos": [...], "points": n}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppState {
    #[serde(flatten)]
    pub entries: EntryStore,
    pub points: PointsLedger,
}

#[derive(Debug)]
pub enum StorageError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
    Serialize(serde_json::Error),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
            Self::Malformed { path, source } => {
                write!(f, "malformed state document `{}`: {source}", path.display())
            }
            Self::Serialize(err) => write!(f, "failed to serialize state: {err}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Malformed { source, .. } => Some(source),
            Self::Serialize(err) => Some(err),
        }
    }
}

/// Storage gateway for the whole application state.
pub trait StateStore {
    /// Reads the persisted state, or the empty state when none exists.
    fn load(&self) -> StorageResult<AppState>;
    /// Replaces the persisted state with `state`.
    fn save(&mut self, state: &AppState) -> StorageResult<()>;
}
