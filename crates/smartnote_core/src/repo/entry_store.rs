//! Note/todo store.
//!
//! # Responsibility
//! - Append notes and todos in insertion order.
//! - Apply the one-way todo completion toggle by id.
//! - Answer reverse-chronological and date-filtered queries.
//!
//! # Invariants
//! - No entry is removed or reordered.
//! - `todos_after_date` is strict (`date > d`) and keeps insertion order.

use crate::model::entry::{EntryId, Note, Todo};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Result of a completion request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The todo moved from open to completed.
    Completed,
    /// The todo was already completed; nothing changed.
    AlreadyComplete,
}

/// No todo with the requested id exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TodoNotFound(pub EntryId);

impl Display for TodoNotFound {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "todo not found: {}", self.0)
    }
}

impl Error for TodoNotFound {}

/// Ordered note and todo collections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntryStore {
    notes: Vec<Note>,
    todos: Vec<Todo>,
}

impl EntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_note(&mut self, note: Note) {
        self.notes.push(note);
    }

    pub fn push_todo(&mut self, todo: Todo) {
        self.todos.push(todo);
    }

    /// Completes the todo with `id`.
    ///
    /// Completing an already completed todo is a no-op reported as
    /// `Completion::AlreadyComplete`.
    pub fn mark_complete(&mut self, id: EntryId) -> Result<Completion, TodoNotFound> {
        let todo = self
            .todos
            .iter_mut()
            .find(|todo| todo.id == id)
            .ok_or(TodoNotFound(id))?;
        if todo.complete() {
            Ok(Completion::Completed)
        } else {
            Ok(Completion::AlreadyComplete)
        }
    }

    /// Gives every entry with a nil id a fresh one.
    ///
    /// Returns how many ids were assigned; callers persist when non-zero so
    /// the ids survive the next load.
    pub fn assign_missing_ids(&mut self) -> usize {
        let note_ids = self.notes.iter_mut().map(|note| &mut note.id);
        let todo_ids = self.todos.iter_mut().map(|todo| &mut todo.id);
        let mut assigned = 0;
        for id in note_ids.chain(todo_ids).filter(|id| id.is_nil()) {
            *id = Uuid::new_v4();
            assigned += 1;
        }
        assigned
    }

    /// Notes in insertion order.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Todos in insertion order.
    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn todo(&self, id: EntryId) -> Option<&Todo> {
        self.todos.iter().find(|todo| todo.id == id)
    }

    /// Most recent note first.
    pub fn notes_in_reverse_insertion_order(&self) -> impl Iterator<Item = &Note> + '_ {
        self.notes.iter().rev()
    }

    /// Todos due exactly on `date`, in insertion order.
    pub fn todos_for_date(&self, date: NaiveDate) -> impl Iterator<Item = &Todo> + '_ {
        self.todos.iter().filter(move |todo| todo.date == date)
    }

    /// Todos due strictly after `date`, in insertion order.
    pub fn todos_after_date(&self, date: NaiveDate) -> impl Iterator<Item = &Todo> + '_ {
        self.todos.iter().filter(move |todo| todo.date > date)
    }
}
