//! Voice command parser.
//!
//! Recognizes exactly one scheduling phrase, "for tomorrow", anywhere in the
//! utterance and case-insensitively. Other temporal phrases are plain notes.

use crate::model::entry::Todo;
use chrono::{Days, NaiveDate};

/// Trigger phrase, lowercase.
pub const TOMORROW_PHRASE: &str = "for tomorrow";

/// Classifies `utterance` as a todo due the day after `today`.
///
/// The task text is the lowercased utterance with every occurrence of the
/// phrase removed and surrounding whitespace trimmed. An utterance that is
/// only the phrase yields a todo with an empty task.
///
/// Returns `None` when the phrase is absent; the caller records a note.
pub fn parse_voice_command(utterance: &str, today: NaiveDate) -> Option<Todo> {
    let lowered = utterance.to_lowercase();
    if !lowered.contains(TOMORROW_PHRASE) {
        return None;
    }

    let task = lowered.replace(TOMORROW_PHRASE, "");
    let due = today.checked_add_days(Days::new(1))?;
    Some(Todo::new(task.trim(), due))
}

#[cfg(test)]
mod tests {
    use super::parse_voice_command;
    use chrono::NaiveDate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 12, 31).unwrap()
    }

    #[test]
    fn phrase_schedules_lowercased_task_for_next_day() {
        let todo = parse_voice_command("Pick up dry cleaning for tomorrow", today()).unwrap();
        assert_eq!(todo.task, "pick up dry cleaning");
        assert_eq!(todo.date, NaiveDate::from_ymd_opt(2027, 1, 1).unwrap());
        assert!(!todo.completed);
    }

    #[test]
    fn phrase_match_ignores_case_and_position() {
        let todo = parse_voice_command("  FOR TOMORROW book the vet ", today()).unwrap();
        assert_eq!(todo.task, "book the vet");
    }

    #[test]
    fn other_temporal_phrases_are_not_commands() {
        assert!(parse_voice_command("call mom next week", today()).is_none());
        assert!(parse_voice_command("tomorrow buy bread", today()).is_none());
        assert!(parse_voice_command("", today()).is_none());
    }

    #[test]
    fn bare_phrase_yields_empty_task() {
        let todo = parse_voice_command("For tomorrow", today()).unwrap();
        assert_eq!(todo.task, "");
    }
}
