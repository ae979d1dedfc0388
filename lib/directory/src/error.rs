//! Error types for the directory crate.

use aula_core::{GradeId, StudentId, UserId};
use std::fmt;

/// Errors from profile and roster storage operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    /// No profile stored for the user.
    ProfileNotFound { user_id: UserId },
    /// The referenced grade level does not exist.
    GradeNotFound { grade: GradeId },
    /// The grade level has no open seats.
    GradeFull { grade: GradeId },
    /// The referenced student does not exist.
    StudentNotFound { student: StudentId },
    /// The backing store failed.
    StoreFailed { reason: String },
}

impl fmt::Display for DirectoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProfileNotFound { user_id } => {
                write!(f, "no profile for user: {user_id}")
            }
            Self::GradeNotFound { grade } => {
                write!(f, "grade level not found: {grade}")
            }
            Self::GradeFull { grade } => {
                write!(f, "grade level has no open seats: {grade}")
            }
            Self::StudentNotFound { student } => {
                write!(f, "student not found: {student}")
            }
            Self::StoreFailed { reason } => {
                write!(f, "directory store failed: {reason}")
            }
        }
    }
}

impl std::error::Error for DirectoryError {}
