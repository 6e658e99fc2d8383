//! Console probe for the roster core.
//!
//! # Responsibility
//! - Open (or create) a roster database and print it ordered by total
//!   score, verifying `scorebook_core` linkage end to end.
//! - Keep output deterministic for quick local sanity checks.

use scorebook_core::{open_db, RosterManager, SortKey, SqliteStudentRepository};
use std::process::ExitCode;

fn main() -> ExitCode {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "scorebook.db".to_string());

    match run(&path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("scorebook: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let conn = open_db(path)?;
    let repo = SqliteStudentRepository::try_new(&conn)?;
    let mut roster = RosterManager::new(repo);

    println!("scorebook_core version={}", scorebook_core::core_version());
    for record in roster.total_search(SortKey::TotalDesc)? {
        println!(
            "{}\t{}\tkorean={} english={} math={} science={}\ttotal={} average={} grade={}",
            record.sno,
            record.name,
            record.korean,
            record.english,
            record.math,
            record.science,
            record.total,
            record.average,
            record.grade
        );
    }

    Ok(())
}
