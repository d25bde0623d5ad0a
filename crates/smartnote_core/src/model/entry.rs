//! Note and todo records.
//!
//! # Responsibility
//! - Define the canonical note/todo shapes and their JSON wire format.
//! - Provide lifecycle helpers for the one-way completion toggle.
//!
//! # Invariants
//! - `id` is stable and never reused for another entry; a nil id means
//!   the entry has not been assigned one yet.
//! - `Todo::completed` only transitions from `false` to `true`.
//! - Note timestamps carry minute precision; todo dates carry day precision.

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier shared by notes and todos.
pub type EntryId = Uuid;

/// Free-form text entry stamped with its creation minute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Nil when read from a document written before ids existed.
    #[serde(default)]
    pub id: EntryId,
    pub text: String,
    /// Serialized as `YYYY-MM-DD HH:MM`.
    #[serde(with = "minute_timestamp")]
    pub date: NaiveDateTime,
}

impl Note {
    /// Creates a note with a generated stable ID.
    ///
    /// Seconds and sub-second parts of `created_at` are dropped so the
    /// in-memory value equals what a reload produces.
    pub fn new(text: impl Into<String>, created_at: NaiveDateTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            date: truncate_to_minute(created_at),
        }
    }
}

/// Dated task with a one-way completion flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    #[serde(default)]
    pub id: EntryId,
    pub task: String,
    /// Serialized as zero-padded `YYYY-MM-DD`, so string order is date order.
    pub date: NaiveDate,
    #[serde(default)]
    pub completed: bool,
}

impl Todo {
    /// Creates an open todo due on `date`.
    pub fn new(task: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            task: task.into(),
            date,
            completed: false,
        }
    }

    /// Marks the todo completed.
    ///
    /// Returns `false` when it was already completed, so callers can keep
    /// completion side effects (points) idempotent.
    pub fn complete(&mut self) -> bool {
        if self.completed {
            return false;
        }
        self.completed = true;
        true
    }

    /// Returns whether the todo is still actionable.
    pub fn is_open(&self) -> bool {
        !self.completed
    }
}

fn truncate_to_minute(value: NaiveDateTime) -> NaiveDateTime {
    value
        .with_second(0)
        .and_then(|value| value.with_nanosecond(0))
        .unwrap_or(value)
}

/// Serde adapter for minute-precision timestamps (`YYYY-MM-DD HH:MM`).
pub mod minute_timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d %H:%M";

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&value.format(FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::{Note, Todo};
    use chrono::NaiveDate;

    #[test]
    fn note_drops_seconds_from_creation_time() {
        let created_at = NaiveDate::from_ymd_opt(2026, 3, 4)
            .unwrap()
            .and_hms_opt(9, 15, 42)
            .unwrap();
        let note = Note::new("standup", created_at);
        assert_eq!(note.date.to_string(), "2026-03-04 09:15:00");
    }

    #[test]
    fn complete_is_one_way() {
        let mut todo = Todo::new("ship", NaiveDate::from_ymd_opt(2026, 3, 4).unwrap());
        assert!(todo.is_open());
        assert!(todo.complete());
        assert!(!todo.complete());
        assert!(todo.completed);
    }
}
