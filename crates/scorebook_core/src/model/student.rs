//! Student record domain model.
//!
//! # Responsibility
//! - Define the canonical record with raw subject scores and derived
//!   aggregates.
//! - Provide clamping and recomputation helpers used by every write path.
//!
//! # Invariants
//! - `sno` is stable and never reused for another student.
//! - Subject scores are clamped into `[0, 100]`, never rejected.
//! - `total`, `average` and `grade` always reflect the clamped scores.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Lower clamp bound for a subject score.
pub const SCORE_MIN: i64 = 0;
/// Upper clamp bound for a subject score.
pub const SCORE_MAX: i64 = 100;
/// Fixed number of graded subjects. The average always divides by this,
/// not by a count of valid scores.
pub const SUBJECT_COUNT: i64 = 4;

/// Letter grade derived from a record's average score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// Maps an average to its letter grade.
    ///
    /// Thresholds are evaluated highest-first with inclusive lower bounds:
    /// `>=90 → A`, `>=80 → B`, `>=70 → C`, `>=60 → D`, else `F`.
    pub fn from_average(average: f64) -> Self {
        if average >= 90.0 {
            Self::A
        } else if average >= 80.0 {
            Self::B
        } else if average >= 70.0 {
            Self::C
        } else if average >= 60.0 {
            Self::D
        } else {
            Self::F
        }
    }

    /// Returns the single-letter representation.
    pub fn letter(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        }
    }
}

impl Display for Grade {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.letter())
    }
}

/// Clamps a single subject score into `[SCORE_MIN, SCORE_MAX]`.
///
/// Idempotent: clamping an already-clamped value is a no-op.
pub fn clamp_score(value: i64) -> i64 {
    value.clamp(SCORE_MIN, SCORE_MAX)
}

/// Canonical student roster record.
///
/// Raw subject scores and derived aggregates live in one shape; callers
/// mutate scores and rely on [`StudentRecord::normalize`] to restore the
/// derived-field invariants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    /// Stable student number, the roster and store primary key.
    pub sno: String,
    pub name: String,
    pub korean: i64,
    pub english: i64,
    pub math: i64,
    pub science: i64,
    /// Sum of the four post-clamp scores.
    pub total: i64,
    /// `total / 4.0`, fixed subject count.
    pub average: f64,
    /// Threshold-mapped letter for the current `average`.
    pub grade: Grade,
}

impl StudentRecord {
    /// Creates a record with clamped scores and derived fields computed.
    pub fn new(
        sno: impl Into<String>,
        name: impl Into<String>,
        korean: i64,
        english: i64,
        math: i64,
        science: i64,
    ) -> Self {
        let mut record = Self {
            sno: sno.into(),
            name: name.into(),
            korean,
            english,
            math,
            science,
            total: 0,
            average: 0.0,
            grade: Grade::F,
        };
        record.normalize();
        record
    }

    /// Re-clamps every subject score and recomputes the derived fields.
    ///
    /// Applied on load and on every write path so a record never leaves
    /// core with stale aggregates.
    pub fn normalize(&mut self) {
        self.korean = clamp_score(self.korean);
        self.english = clamp_score(self.english);
        self.math = clamp_score(self.math);
        self.science = clamp_score(self.science);
        self.total = self.korean + self.english + self.math + self.science;
        self.average = self.total as f64 / SUBJECT_COUNT as f64;
        self.grade = Grade::from_average(self.average);
    }
}

#[cfg(test)]
mod tests {
    use super::{clamp_score, Grade, StudentRecord, SCORE_MAX, SCORE_MIN};

    #[test]
    fn clamp_score_bounds_and_idempotence() {
        assert_eq!(clamp_score(-5), SCORE_MIN);
        assert_eq!(clamp_score(105), SCORE_MAX);
        assert_eq!(clamp_score(70), 70);
        assert_eq!(clamp_score(clamp_score(-5)), clamp_score(-5));
        assert_eq!(clamp_score(clamp_score(105)), clamp_score(105));
    }

    #[test]
    fn grade_boundaries_are_inclusive() {
        assert_eq!(Grade::from_average(90.0), Grade::A);
        assert_eq!(Grade::from_average(80.0), Grade::B);
        assert_eq!(Grade::from_average(70.0), Grade::C);
        assert_eq!(Grade::from_average(60.0), Grade::D);
        assert_eq!(Grade::from_average(59.999), Grade::F);
        assert_eq!(Grade::from_average(100.0), Grade::A);
    }

    #[test]
    fn new_clamps_and_derives() {
        let record = StudentRecord::new("S1", "Kim", 105, -5, 70, 80);
        assert_eq!(record.korean, 100);
        assert_eq!(record.english, 0);
        assert_eq!(record.math, 70);
        assert_eq!(record.science, 80);
        assert_eq!(record.total, 250);
        assert_eq!(record.average, 62.5);
        assert_eq!(record.grade, Grade::D);
    }

    #[test]
    fn normalize_restores_derived_fields_after_mutation() {
        let mut record = StudentRecord::new("S2", "Lee", 90, 90, 90, 90);
        assert_eq!(record.grade, Grade::A);

        record.math = 1000;
        record.normalize();
        assert_eq!(record.math, 100);
        assert_eq!(record.total, 370);
        assert_eq!(record.average, 92.5);
        assert_eq!(record.grade, Grade::A);
    }
}
