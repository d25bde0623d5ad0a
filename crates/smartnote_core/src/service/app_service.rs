//! Application facade.
//!
//! # Responsibility
//! - Own the session state explicitly (no global session object).
//! - Apply each user action, award its points, and persist the full state.
//!
//! # Invariants
//! - Each mutating action performs exactly one full-state save before it
//!   returns; actions that change nothing do not save.
//! - Opening saves only when it had to assign missing entry ids.
//! - A failed save leaves the in-memory state untouched: the next state is
//!   staged on a copy and committed only after it is persisted.
//! - Empty input and recognition failures never mutate state.

use crate::clock::{Clock, SystemClock};
use crate::model::entry::{EntryId, Note, Todo};
use crate::model::points::{
    Achievement, COMPLETED_TODO_POINTS, TYPED_NOTE_POINTS, TYPED_TODO_POINTS, VOICE_NOTE_POINTS,
    VOICE_TODO_POINTS,
};
use crate::repo::entry_store::{Completion, TodoNotFound};
use crate::storage::{AppState, StateStore, StorageError};
use crate::voice::parser::parse_voice_command;
use crate::voice::recognizer::{RecognitionError, SpeechRecognizer};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug)]
pub enum ServiceError {
    /// Loading or saving the state document failed.
    Storage(StorageError),
    /// No todo carries the requested id.
    TodoNotFound(EntryId),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "{err}"),
            Self::TodoNotFound(id) => write!(f, "todo not found: {id}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::TodoNotFound(_) => None,
        }
    }
}

impl From<StorageError> for ServiceError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<TodoNotFound> for ServiceError {
    fn from(value: TodoNotFound) -> Self {
        Self::TodoNotFound(value.0)
    }
}

/// Points side of a completed action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointsAward {
    pub awarded: u64,
    /// Total after the award.
    pub total: u64,
    /// Achievements first reached by this award.
    pub unlocked: Vec<Achievement>,
}

/// Entity produced or changed by an action, with its points award.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionReport<T> {
    pub entry: T,
    pub points: PointsAward,
}

/// Result of one voice capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceOutcome {
    /// Transcript contained the scheduling phrase.
    ScheduledTodo(ActionReport<Todo>),
    /// Transcript recorded as a plain note.
    Note(ActionReport<Note>),
    /// Recognizer failed; nothing was recorded.
    Failed(RecognitionError),
    /// Recognizer returned an empty transcript.
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
    Completed(ActionReport<Todo>),
    /// Already done; no points, no save.
    AlreadyComplete,
}

/// Facade over one session's state, its store, and a clock.
pub struct AppService<S: StateStore, C: Clock = SystemClock> {
    store: S,
    clock: C,
    state: AppState,
}

impl<S: StateStore> AppService<S, SystemClock> {
    /// Loads persisted state using the local system clock.
    pub fn open(store: S) -> ServiceResult<Self> {
        Self::open_with_clock(store, SystemClock)
    }
}

impl<S: StateStore, C: Clock> AppService<S, C> {
    /// Loads persisted state from `store`.
    ///
    /// Entries stored without ids get fresh ones, which are saved right away
    /// so they stay stable across sessions that only read.
    ///
    /// # Errors
    /// - `ServiceError::Storage` when the document exists but cannot be read
    ///   or parsed. The session does not start, so a corrupt document is
    ///   never replaced by an empty one.
    /// - `ServiceError::Storage` when saving newly assigned ids fails.
    pub fn open_with_clock(mut store: S, clock: C) -> ServiceResult<Self> {
        let mut state = match store.load() {
            Ok(state) => state,
            Err(err) => {
                error!("event=session_open module=service status=error error={err}");
                return Err(err.into());
            }
        };

        let assigned = state.entries.assign_missing_ids();
        if assigned > 0 {
            if let Err(err) = store.save(&state) {
                error!("event=assign_ids module=service status=error assigned={assigned} error={err}");
                return Err(err.into());
            }
            info!("event=assign_ids module=service status=ok assigned={assigned}");
        }
        info!(
            "event=session_open module=service status=ok notes={} todos={} points={}",
            state.entries.notes().len(),
            state.entries.todos().len(),
            state.points.total()
        );
        Ok(Self {
            store,
            clock,
            state,
        })
    }

    /// Saves a typed note (+5). Empty text is ignored; whitespace is kept.
    pub fn save_note(&mut self, text: &str) -> ServiceResult<Option<ActionReport<Note>>> {
        if text.is_empty() {
            return Ok(None);
        }
        let note = Note::new(text, self.clock.now());
        self.commit_note("save_note", note, TYPED_NOTE_POINTS).map(Some)
    }

    /// Adds a typed todo due today (+5). Empty text is ignored.
    pub fn add_todo(&mut self, text: &str) -> ServiceResult<Option<ActionReport<Todo>>> {
        if text.is_empty() {
            return Ok(None);
        }
        let todo = Todo::new(text, self.clock.today());
        self.commit_todo("add_todo", todo, TYPED_TODO_POINTS).map(Some)
    }

    /// Captures one utterance from `recognizer` and records it.
    ///
    /// Recognition failures are returned as `VoiceOutcome::Failed` and leave
    /// state untouched; only persistence failures are errors.
    pub fn record_voice<R>(&mut self, recognizer: &mut R) -> ServiceResult<VoiceOutcome>
    where
        R: SpeechRecognizer + ?Sized,
    {
        match recognizer.transcribe() {
            Ok(transcript) => self.record_transcript(&transcript),
            Err(err) => {
                warn!(
                    "event=voice_capture module=service status=error error_code={}",
                    err.code()
                );
                Ok(VoiceOutcome::Failed(err))
            }
        }
    }

    /// Records an already transcribed utterance.
    ///
    /// "for tomorrow" schedules a todo for the next day (+10); anything
    /// else becomes a note (+8).
    pub fn record_transcript(&mut self, transcript: &str) -> ServiceResult<VoiceOutcome> {
        if transcript.is_empty() {
            return Ok(VoiceOutcome::Ignored);
        }
        let now = self.clock.now();
        match parse_voice_command(transcript, now.date()) {
            Some(todo) => self
                .commit_todo("voice_todo", todo, VOICE_TODO_POINTS)
                .map(VoiceOutcome::ScheduledTodo),
            None => self
                .commit_note("voice_note", Note::new(transcript, now), VOICE_NOTE_POINTS)
                .map(VoiceOutcome::Note),
        }
    }

    /// Completes the todo with `id` (+10 the first time only).
    pub fn mark_todo_complete(&mut self, id: EntryId) -> ServiceResult<CompletionOutcome> {
        let todo = self
            .state
            .entries
            .todo(id)
            .ok_or(ServiceError::TodoNotFound(id))?;
        if todo.completed {
            return Ok(CompletionOutcome::AlreadyComplete);
        }

        // Existence and open status were checked above.
        let (completion, points) = self.commit("complete_todo", COMPLETED_TODO_POINTS, |state| {
            state.entries.mark_complete(id)
        })?;
        debug_assert_eq!(completion, Ok(Completion::Completed));

        let entry = self
            .state
            .entries
            .todo(id)
            .cloned()
            .ok_or(ServiceError::TodoNotFound(id))?;
        Ok(CompletionOutcome::Completed(ActionReport { entry, points }))
    }

    /// Adds `amount` points and persists immediately.
    pub fn award_points(&mut self, amount: u64) -> ServiceResult<PointsAward> {
        self.commit("award_points", amount, |_| ()).map(|(_, award)| award)
    }

    /// Notes, most recent first.
    pub fn notes(&self) -> impl Iterator<Item = &Note> + '_ {
        self.state.entries.notes_in_reverse_insertion_order()
    }

    /// All todos in insertion order.
    pub fn todos(&self) -> &[Todo] {
        self.state.entries.todos()
    }

    /// Todos due today, in insertion order.
    pub fn todays_todos(&self) -> impl Iterator<Item = &Todo> + '_ {
        self.state.entries.todos_for_date(self.clock.today())
    }

    /// Todos due after today, in insertion order.
    pub fn future_todos(&self) -> impl Iterator<Item = &Todo> + '_ {
        self.state.entries.todos_after_date(self.clock.today())
    }

    pub fn points(&self) -> u64 {
        self.state.points.total()
    }

    pub fn achievements(&self) -> Vec<Achievement> {
        self.state.points.achievements()
    }

    /// Current in-memory state, equal to the last persisted document.
    pub fn snapshot(&self) -> &AppState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    fn commit_note(
        &mut self,
        action: &'static str,
        note: Note,
        amount: u64,
    ) -> ServiceResult<ActionReport<Note>> {
        let entry = note.clone();
        let (_, points) = self.commit(action, amount, |state| state.entries.push_note(note))?;
        Ok(ActionReport { entry, points })
    }

    fn commit_todo(
        &mut self,
        action: &'static str,
        todo: Todo,
        amount: u64,
    ) -> ServiceResult<ActionReport<Todo>> {
        let entry = todo.clone();
        let (_, points) = self.commit(action, amount, |state| state.entries.push_todo(todo))?;
        Ok(ActionReport { entry, points })
    }

    /// Stages `apply` plus an award of `amount`, saves, then commits.
    fn commit<T>(
        &mut self,
        action: &'static str,
        amount: u64,
        apply: impl FnOnce(&mut AppState) -> T,
    ) -> ServiceResult<(T, PointsAward)> {
        let mut next = self.state.clone();
        let value = apply(&mut next);
        let unlocked = next.points.award(amount);

        if let Err(err) = self.store.save(&next) {
            error!("event=action module=service status=error action={action} error={err}");
            return Err(err.into());
        }
        self.state = next;

        let total = self.state.points.total();
        info!("event=action module=service status=ok action={action} awarded={amount} total={total}");
        for achievement in &unlocked {
            info!(
                "event=achievement_unlocked module=service status=ok threshold={} label={}",
                achievement.threshold, achievement.label
            );
        }

        Ok((
            value,
            PointsAward {
                awarded: amount,
                total,
                unlocked,
            },
        ))
    }
}
