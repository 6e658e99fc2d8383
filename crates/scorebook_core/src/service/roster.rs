//! Roster manager: in-memory roster synchronized with the backing store.
//!
//! # Responsibility
//! - Own the in-memory roster and its lazy load lifecycle.
//! - Keep every mutation mirrored between store and roster, with score
//!   normalization and derived-field recomputation on each write.
//!
//! # Invariants
//! - At most one roster record per `sno`.
//! - The roster is loaded wholesale at most once per lifecycle transition;
//!   an empty but successfully loaded roster never re-triggers a reload.
//! - Roster entries are located by `sno` key, never by whole-record
//!   equality.

use crate::model::student::StudentRecord;
use crate::repo::student_repo::{RepoError, StudentRepository};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type RosterResult<T> = Result<T, RosterError>;

/// Error taxonomy for roster operations.
#[derive(Debug)]
pub enum RosterError {
    /// Persistence failure during a single-statement operation.
    Repo(RepoError),
    /// Whole-roster load failure. Recoverable: the next operation retries.
    Load(RepoError),
    /// The store acknowledged a row the in-memory roster does not hold.
    MissingRosterEntry(String),
    /// A keyed write touched more rows than the uniqueness invariant allows.
    StoreInconsistency { sno: String, rows: usize },
    /// Sort criterion ordinal outside `1..=3`.
    InvalidSortKey(usize),
}

impl Display for RosterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::Load(err) => write!(f, "roster load failed: {err}"),
            Self::MissingRosterEntry(sno) => {
                write!(f, "roster has no entry for student `{sno}`")
            }
            Self::StoreInconsistency { sno, rows } => write!(
                f,
                "store changed {rows} rows for student `{sno}`; expected at most one"
            ),
            Self::InvalidSortKey(ordinal) => {
                write!(f, "invalid sort criterion {ordinal}; expected 1..=3")
            }
        }
    }
}

impl Error for RosterError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) | Self::Load(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for RosterError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Load lifecycle of the in-memory roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterState {
    /// No load attempted yet; the first operation triggers one.
    Unloaded,
    /// Roster mirrors the store, even when both are empty.
    Loaded,
    /// Last load failed; the next operation retries.
    LoadFailed,
}

/// Result of a write against the backing store.
///
/// Keeps "nothing to do" distinct from "something broke": a zero-rows
/// write is reported here, never raised as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// Store and roster were both mutated.
    Applied,
    /// The store reported zero affected rows; roster left untouched.
    Unchanged,
}

/// Total ordering applied by [`RosterManager::sort`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Ascending by `name`, lexicographic.
    Name,
    /// Ascending by `sno`, lexicographic.
    StudentNo,
    /// Descending by `total`, ties broken by descending `average`.
    TotalDesc,
}

impl SortKey {
    /// Maps the 1-indexed console criterion to a sort key.
    ///
    /// # Errors
    /// Returns [`RosterError::InvalidSortKey`] for ordinals outside `1..=3`.
    pub fn from_ordinal(ordinal: usize) -> RosterResult<Self> {
        match ordinal {
            1 => Ok(Self::Name),
            2 => Ok(Self::StudentNo),
            3 => Ok(Self::TotalDesc),
            other => Err(RosterError::InvalidSortKey(other)),
        }
    }
}

/// In-memory roster of student records backed by a persistent store.
///
/// Explicitly constructed over any [`StudentRepository`] implementation;
/// there is no process-wide instance. One manager owns one roster.
pub struct RosterManager<R: StudentRepository> {
    repo: R,
    records: Vec<StudentRecord>,
    state: RosterState,
}

impl<R: StudentRepository> RosterManager<R> {
    /// Creates a manager with an unloaded roster.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            records: Vec::new(),
            state: RosterState::Unloaded,
        }
    }

    /// Returns the current load lifecycle state.
    pub fn state(&self) -> RosterState {
        self.state
    }

    /// Returns the roster in its current order without touching the store.
    pub fn records(&self) -> &[StudentRecord] {
        &self.records
    }

    /// Inserts a new record into store and roster.
    ///
    /// The store receives the caller's raw field values; clamping and
    /// derived-field computation apply to the roster copy after the write
    /// succeeds. A duplicate `sno` surfaces as a store constraint error.
    pub fn insert(&mut self, mut record: StudentRecord) -> RosterResult<WriteOutcome> {
        self.ensure_loaded()?;

        let started_at = Instant::now();
        let rows = self.repo.insert(&record)?;
        if rows == 0 {
            warn!(
                "event=roster_insert module=service status=unchanged sno={} duration_ms={}",
                record.sno,
                started_at.elapsed().as_millis()
            );
            return Ok(WriteOutcome::Unchanged);
        }

        record.normalize();
        info!(
            "event=roster_insert module=service status=ok sno={} total={} grade={} duration_ms={}",
            record.sno,
            record.total,
            record.grade,
            started_at.elapsed().as_millis()
        );
        self.records.push(record);
        Ok(WriteOutcome::Applied)
    }

    /// Updates an existing record in store and roster.
    ///
    /// Normalization runs before the load check so the store receives
    /// clamped values. A store update that succeeds without a matching
    /// roster entry fails loudly rather than silently succeeding.
    pub fn update(&mut self, mut record: StudentRecord) -> RosterResult<WriteOutcome> {
        record.normalize();
        self.ensure_loaded()?;

        let started_at = Instant::now();
        let rows = self.repo.update(&record)?;
        if rows == 0 {
            warn!(
                "event=roster_update module=service status=unchanged sno={} duration_ms={}",
                record.sno,
                started_at.elapsed().as_millis()
            );
            return Ok(WriteOutcome::Unchanged);
        }

        let position = self.position_of(&record.sno);
        match position {
            Some(index) => {
                info!(
                    "event=roster_update module=service status=ok sno={} total={} grade={} duration_ms={}",
                    record.sno,
                    record.total,
                    record.grade,
                    started_at.elapsed().as_millis()
                );
                self.records[index] = record;
                Ok(WriteOutcome::Applied)
            }
            None => {
                error!(
                    "event=roster_update module=service status=error sno={} error_code=missing_roster_entry",
                    record.sno
                );
                Err(RosterError::MissingRosterEntry(record.sno))
            }
        }
    }

    /// Deletes the record keyed by `sno` from store and roster.
    ///
    /// Zero affected rows is a no-op, not an error. More than one affected
    /// row violates the uniqueness invariant and is reported as a store
    /// consistency failure.
    pub fn delete(&mut self, sno: &str) -> RosterResult<WriteOutcome> {
        self.ensure_loaded()?;

        let started_at = Instant::now();
        let rows = self.repo.delete(sno)?;
        match rows {
            0 => {
                warn!(
                    "event=roster_delete module=service status=unchanged sno={sno} duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(WriteOutcome::Unchanged)
            }
            1 => match self.position_of(sno) {
                Some(index) => {
                    self.records.remove(index);
                    info!(
                        "event=roster_delete module=service status=ok sno={sno} duration_ms={}",
                        started_at.elapsed().as_millis()
                    );
                    Ok(WriteOutcome::Applied)
                }
                None => {
                    error!(
                        "event=roster_delete module=service status=error sno={sno} error_code=missing_roster_entry"
                    );
                    Err(RosterError::MissingRosterEntry(sno.to_string()))
                }
            },
            rows => {
                error!(
                    "event=roster_delete module=service status=error sno={sno} rows={rows} error_code=store_inconsistency"
                );
                Err(RosterError::StoreInconsistency {
                    sno: sno.to_string(),
                    rows,
                })
            }
        }
    }

    /// Looks up one record by `sno`, confirming it against the store first.
    ///
    /// A store miss is a normal empty result. A store hit whose record is
    /// absent from the roster is a divergence and fails loudly.
    pub fn search(&mut self, sno: &str) -> RosterResult<Option<&StudentRecord>> {
        self.ensure_loaded()?;

        if !self.repo.exists(sno)? {
            return Ok(None);
        }

        match self.position_of(sno) {
            Some(index) => Ok(Some(&self.records[index])),
            None => Err(RosterError::MissingRosterEntry(sno.to_string())),
        }
    }

    /// Reorders the roster in place. Never touches the store.
    pub fn sort(&mut self, key: SortKey) {
        match key {
            SortKey::Name => self.records.sort_by(|a, b| a.name.cmp(&b.name)),
            SortKey::StudentNo => self.records.sort_by(|a, b| a.sno.cmp(&b.sno)),
            SortKey::TotalDesc => self.records.sort_by(|a, b| {
                b.total
                    .cmp(&a.total)
                    .then_with(|| b.average.total_cmp(&a.average))
            }),
        }
    }

    /// Returns the full roster ordered by `key`, loading it first if needed.
    ///
    /// Read-only with respect to persistence; the reorder mutates roster
    /// order in place.
    pub fn total_search(&mut self, key: SortKey) -> RosterResult<&[StudentRecord]> {
        self.ensure_loaded()?;
        self.sort(key);
        Ok(&self.records)
    }

    /// Loads the whole roster from the store on first use.
    ///
    /// Only `Unloaded` and `LoadFailed` trigger a fetch; a load failure is
    /// returned to the caller as a recoverable [`RosterError::Load`] and
    /// the next operation retries.
    fn ensure_loaded(&mut self) -> RosterResult<()> {
        if self.state == RosterState::Loaded {
            return Ok(());
        }

        let started_at = Instant::now();
        info!("event=roster_load module=service status=start");
        match self.repo.fetch_all() {
            Ok(records) => {
                info!(
                    "event=roster_load module=service status=ok count={} duration_ms={}",
                    records.len(),
                    started_at.elapsed().as_millis()
                );
                self.records = records;
                self.state = RosterState::Loaded;
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=roster_load module=service status=error duration_ms={} error_code=roster_load_failed error={err}",
                    started_at.elapsed().as_millis()
                );
                self.state = RosterState::LoadFailed;
                Err(RosterError::Load(err))
            }
        }
    }

    fn position_of(&self, sno: &str) -> Option<usize> {
        self.records.iter().position(|record| record.sno == sno)
    }
}
