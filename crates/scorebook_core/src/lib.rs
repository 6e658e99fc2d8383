//! Core domain logic for Scorebook.
//! This crate is the single source of truth for roster invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{open_db, open_db_in_memory, ConnectionProvider, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::student::{clamp_score, Grade, StudentRecord, SCORE_MAX, SCORE_MIN, SUBJECT_COUNT};
pub use repo::student_repo::{RepoError, RepoResult, SqliteStudentRepository, StudentRepository};
pub use service::roster::{
    RosterError, RosterManager, RosterResult, RosterState, SortKey, WriteOutcome,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
