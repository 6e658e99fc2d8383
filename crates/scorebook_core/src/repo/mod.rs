//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the data access contract for the roster backing store.
//! - Isolate SQLite query details from roster orchestration.
//!
//! # Invariants
//! - Each repository call issues exactly one statement and releases its
//!   prepared statement and row cursor before returning.
//! - Write methods report affected-row counts; the soft-failure policy
//!   lives in the roster service, not here.

pub mod student_repo;
