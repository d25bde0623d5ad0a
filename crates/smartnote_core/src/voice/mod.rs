//! Voice input: recognizer port and command classification.
//!
//! # Responsibility
//! - Abstract the external speech-to-text provider behind a trait.
//! - Classify transcripts into scheduled todos or plain notes.

pub mod parser;
pub mod recognizer;
