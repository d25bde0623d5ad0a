//! JSON file implementation of the storage gateway.
//!
//! # Responsibility
//! - Persist the state document at one fixed path.
//! - Replace the document atomically on every save.
//!
//! # Invariants
//! - Saves write a sibling `*.tmp` file, sync it, then rename it over the
//!   target; a crash leaves either the old or the new document.
//! - The parent directory is created on demand.
//! - A failed save removes its `*.tmp` file.
//! - Concurrent writers on the same path are not coordinated.

use super::{AppState, StateStore, StorageError, StorageResult};
use log::{error, info, warn};
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Relative path used when no data path is configured.
pub const DEFAULT_DATA_PATH: &str = "data/app_data.json";

/// File-backed state store.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("state"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, path: &Path, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    fn write_document(&self, state: &AppState) -> StorageResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| self.io_error(parent, err))?;
        }

        let tmp = self.tmp_path();
        let result = self.write_tmp(&tmp, state).and_then(|()| {
            fs::rename(&tmp, &self.path).map_err(|err| self.io_error(&self.path, err))
        });
        if result.is_err() {
            let _ = fs::remove_file(&tmp);
        }
        result
    }

    fn write_tmp(&self, tmp: &Path, state: &AppState) -> StorageResult<()> {
        let file = File::create(tmp).map_err(|err| self.io_error(tmp, err))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, state).map_err(StorageError::Serialize)?;
        writer.flush().map_err(|err| self.io_error(tmp, err))?;
        writer
            .get_ref()
            .sync_all()
            .map_err(|err| self.io_error(tmp, err))
    }
}

impl Default for JsonFileStore {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_PATH)
    }
}

impl StateStore for JsonFileStore {
    fn load(&self) -> StorageResult<AppState> {
        let started_at = Instant::now();
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    "event=state_load module=storage status=missing path={}",
                    self.path.display()
                );
                return Ok(AppState::default());
            }
            Err(err) => {
                error!(
                    "event=state_load module=storage status=error error_code=read_failed path={} error={}",
                    self.path.display(),
                    err
                );
                return Err(self.io_error(&self.path, err));
            }
        };

        match serde_json::from_slice::<AppState>(&bytes) {
            Ok(state) => {
                info!(
                    "event=state_load module=storage status=ok duration_ms={} notes={} todos={} points={}",
                    started_at.elapsed().as_millis(),
                    state.entries.notes().len(),
                    state.entries.todos().len(),
                    state.points.total()
                );
                Ok(state)
            }
            Err(err) => {
                warn!(
                    "event=state_load module=storage status=error error_code=malformed path={} line={} column={}",
                    self.path.display(),
                    err.line(),
                    err.column()
                );
                Err(StorageError::Malformed {
                    path: self.path.clone(),
                    source: err,
                })
            }
        }
    }

    fn save(&mut self, state: &AppState) -> StorageResult<()> {
        let started_at = Instant::now();
        match self.write_document(state) {
            Ok(()) => {
                info!(
                    "event=state_save module=storage status=ok duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=state_save module=storage status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }
}
