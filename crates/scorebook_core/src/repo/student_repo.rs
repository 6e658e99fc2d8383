//! Student repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the canonical `student` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Every statement is parameterized; no caller input is spliced into SQL.
//! - Read paths normalize persisted scores before handing records to core.
//! - Construction validates that the connection is schema-ready instead of
//!   failing later mid-statement.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::student::StudentRecord;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const STUDENT_SELECT_SQL: &str = "SELECT
    sno,
    name,
    korean,
    english,
    math,
    science
FROM student";

const REQUIRED_COLUMNS: &[&str] = &["sno", "name", "korean", "english", "math", "science"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for student persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection is not schema-ready: user_version {actual_version}, expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for student record persistence.
///
/// Write methods return the affected-row count so the roster layer can
/// distinguish "nothing to do" from an applied write.
pub trait StudentRepository {
    /// Fetches every row from the backing store, scores normalized.
    fn fetch_all(&self) -> RepoResult<Vec<StudentRecord>>;
    /// Inserts one record with the caller's raw field values.
    fn insert(&self, record: &StudentRecord) -> RepoResult<usize>;
    /// Updates the row keyed by `record.sno`.
    fn update(&self, record: &StudentRecord) -> RepoResult<usize>;
    /// Deletes the row keyed by `sno`.
    fn delete(&self, sno: &str) -> RepoResult<usize>;
    /// Probes whether a row with the given `sno` exists.
    fn exists(&self, sno: &str) -> RepoResult<bool>;
}

/// SQLite-backed student repository.
pub struct SqliteStudentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStudentRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when `PRAGMA user_version` lags the
    ///   schema version this binary expects.
    /// - `MissingRequiredTable`/`MissingRequiredColumn` when the `student`
    ///   table shape does not match the core contract.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl StudentRepository for SqliteStudentRepository<'_> {
    fn fetch_all(&self) -> RepoResult<Vec<StudentRecord>> {
        let mut stmt = self.conn.prepare(STUDENT_SELECT_SQL)?;
        let mut rows = stmt.query([])?;
        let mut records = Vec::new();

        while let Some(row) = rows.next()? {
            records.push(parse_student_row(row)?);
        }

        Ok(records)
    }

    fn insert(&self, record: &StudentRecord) -> RepoResult<usize> {
        let changed = self.conn.execute(
            "INSERT INTO student (sno, name, korean, english, math, science)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                record.sno.as_str(),
                record.name.as_str(),
                record.korean,
                record.english,
                record.math,
                record.science,
            ],
        )?;

        Ok(changed)
    }

    fn update(&self, record: &StudentRecord) -> RepoResult<usize> {
        let changed = self.conn.execute(
            "UPDATE student
             SET
                name = ?1,
                korean = ?2,
                english = ?3,
                math = ?4,
                science = ?5
             WHERE sno = ?6;",
            params![
                record.name.as_str(),
                record.korean,
                record.english,
                record.math,
                record.science,
                record.sno.as_str(),
            ],
        )?;

        Ok(changed)
    }

    fn delete(&self, sno: &str) -> RepoResult<usize> {
        let changed = self
            .conn
            .execute("DELETE FROM student WHERE sno = ?1;", [sno])?;

        Ok(changed)
    }

    fn exists(&self, sno: &str) -> RepoResult<bool> {
        let mut stmt = self
            .conn
            .prepare("SELECT sno FROM student WHERE sno = ?1;")?;
        let found = stmt.exists([sno])?;

        Ok(found)
    }
}

fn parse_student_row(row: &Row<'_>) -> RepoResult<StudentRecord> {
    let mut record = StudentRecord {
        sno: row.get("sno")?,
        name: row.get("name")?,
        korean: row.get("korean")?,
        english: row.get("english")?,
        math: row.get("math")?,
        science: row.get("science")?,
        total: 0,
        average: 0.0,
        grade: crate::model::student::Grade::F,
    };
    // Persisted scores may predate clamping; normalize on the way in.
    record.normalize();
    Ok(record)
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version < expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let mut stmt = conn.prepare("PRAGMA table_info(student);")?;
    let mut rows = stmt.query([])?;
    let mut columns = Vec::new();
    while let Some(row) = rows.next()? {
        columns.push(row.get::<_, String>("name")?);
    }

    if columns.is_empty() {
        return Err(RepoError::MissingRequiredTable("student"));
    }
    for required in REQUIRED_COLUMNS {
        if !columns.iter().any(|column| column == required) {
            return Err(RepoError::MissingRequiredColumn {
                table: "student",
                column: required,
            });
        }
    }

    Ok(())
}
