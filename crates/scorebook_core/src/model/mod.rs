//! Domain model for student roster records.
//!
//! # Responsibility
//! - Define the canonical student record shape used by core logic.
//! - Own score normalization and derived-field computation.
//!
//! # Invariants
//! - Every record is identified by a stable `sno` string key.
//! - Derived fields (`total`, `average`, `grade`) are always consistent
//!   with the post-clamp subject scores.

pub mod student;
