//! Plain-text views over facade read models.

use smartnote_core::model::entry::minute_timestamp;
use smartnote_core::{Achievement, Note, Todo};
use std::fmt::Write;

pub fn notes<'a>(notes: impl Iterator<Item = &'a Note>) -> String {
    let mut out = String::from("Your Notes\n");
    let mut empty = true;
    for note in notes {
        empty = false;
        let _ = writeln!(out, "Note from {}", note.date.format(minute_timestamp::FORMAT));
        for line in note.text.lines() {
            let _ = writeln!(out, "    {line}");
        }
    }
    if empty {
        out.push_str("    (none)\n");
    }
    out
}

pub fn todos<'a>(
    today: impl Iterator<Item = &'a Todo>,
    future: impl Iterator<Item = &'a Todo>,
) -> String {
    let mut out = String::from("Today's Tasks\n");
    for (index, todo) in today.enumerate() {
        let mark = if todo.completed { 'x' } else { ' ' };
        let _ = writeln!(out, "  {}. [{mark}] {}", index + 1, todo.task);
    }
    out.push_str("Future Tasks\n");
    for todo in future {
        let _ = writeln!(out, "  {}: {}", todo.date, todo.task);
    }
    out
}

/// Highest achievement first.
pub fn points(total: u64, achievements: &[Achievement]) -> String {
    let mut out = format!("Total Points: {total}\n");
    for achievement in achievements.iter().rev() {
        let _ = writeln!(out, "  * {}", achievement.label);
    }
    out
}
