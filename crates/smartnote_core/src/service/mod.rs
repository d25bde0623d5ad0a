//! Core use-case services.
//!
//! # Responsibility
//! - Turn user gestures into store/ledger mutations plus persistence.
//! - Keep presentation layers decoupled from storage details.

pub mod app_service;
