//! The student roster domain.
//!
//! Staff manage enrollment against grade levels with bounded seat
//! counts: a student can only be added to a grade with open seats, and
//! removing a student frees the seat again.

use aula_core::{GradeId, StudentId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A grade level with bounded seating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeLevel {
    /// Unique identifier.
    pub id: GradeId,
    /// Display name, e.g. "3° A".
    pub name: String,
    /// School year the grade belongs to.
    pub year: u16,
    /// Total seats in the group.
    pub seats_total: u32,
    /// Seats still open for enrollment.
    pub seats_available: u32,
}

impl GradeLevel {
    /// Creates a grade level with all seats open.
    #[must_use]
    pub fn new(name: impl Into<String>, year: u16, seats_total: u32) -> Self {
        Self {
            id: GradeId::new(),
            name: name.into(),
            year,
            seats_total,
            seats_available: seats_total,
        }
    }

    /// Returns true if at least one seat is open.
    #[must_use]
    pub fn has_open_seats(&self) -> bool {
        self.seats_available > 0
    }
}

/// An enrolled student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Unique identifier.
    pub id: StudentId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Grade level the student is enrolled in.
    pub grade: GradeId,
    /// Tutor account following this student, when linked.
    pub tutor: Option<UserId>,
    /// When the student was enrolled.
    pub enrolled_at: DateTime<Utc>,
}

impl Student {
    /// Returns the full display name.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Fields collected by the add-student form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Grade level to enroll into.
    pub grade: GradeId,
    /// Tutor account to link, when known at enrollment time.
    pub tutor: Option<UserId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grade_has_all_seats_open() {
        let grade = GradeLevel::new("1° B", 2026, 30);

        assert_eq!(grade.seats_total, 30);
        assert_eq!(grade.seats_available, 30);
        assert!(grade.has_open_seats());
    }

    #[test]
    fn full_grade_has_no_open_seats() {
        let mut grade = GradeLevel::new("1° B", 2026, 1);
        grade.seats_available = 0;
        assert!(!grade.has_open_seats());
    }

    #[test]
    fn student_display_name() {
        let student = Student {
            id: StudentId::new(),
            first_name: "Luis".to_string(),
            last_name: "Hernández".to_string(),
            grade: GradeId::new(),
            tutor: None,
            enrolled_at: Utc::now(),
        };
        assert_eq!(student.display_name(), "Luis Hernández");
    }

    #[test]
    fn grade_serialization_roundtrip() {
        let grade = GradeLevel::new("6° A", 2026, 25);
        let json = serde_json::to_string(&grade).expect("serialize");
        let parsed: GradeLevel = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(grade, parsed);
    }
}
