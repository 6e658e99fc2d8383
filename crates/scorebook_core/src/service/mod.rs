//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into roster-level APIs.
//! - Keep presentation layers decoupled from storage details.

pub mod roster;
