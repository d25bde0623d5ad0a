//! Core domain logic for SmartNote.
//! This crate is the single source of truth for note, todo and points
//! invariants; front ends only call into the facade.

pub mod clock;
pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod storage;
pub mod voice;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{AppConfig, ConfigError};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::entry::{EntryId, Note, Todo};
pub use model::points::{achievements_for, Achievement, PointsLedger, ACHIEVEMENTS};
pub use repo::entry_store::{Completion, EntryStore, TodoNotFound};
pub use service::app_service::{
    ActionReport, AppService, CompletionOutcome, PointsAward, ServiceError, ServiceResult,
    VoiceOutcome,
};
pub use storage::{
    AppState, JsonFileStore, MemoryStore, StateStore, StorageError, StorageResult,
    DEFAULT_DATA_PATH,
};
pub use voice::parser::{parse_voice_command, TOMORROW_PHRASE};
pub use voice::recognizer::{Audio, RecognitionError, ScriptedRecognizer, SpeechRecognizer};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
