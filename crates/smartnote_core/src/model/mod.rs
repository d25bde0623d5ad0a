//! Domain model for notes, todos and the points ledger.
//!
//! # Responsibility
//! - Define the records persisted in the application state document.
//! - Keep gamification rules (point amounts, achievements) next to the data.
//!
//! # Invariants
//! - Every note and todo is identified by a stable `EntryId`.
//! - Entries are never deleted; todos only move from open to completed.

pub mod entry;
pub mod points;
