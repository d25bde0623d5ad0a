//! In-memory entry collections and their query contracts.
//!
//! # Responsibility
//! - Own the ordered note/todo collections of one session.
//! - Provide the date-based projections the presentation layer renders.
//!
//! # Invariants
//! - Collections are append-only; insertion order is preserved.
//! - Completion is the only mutation and addresses todos by stable id.

pub mod entry_store;
