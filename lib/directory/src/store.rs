//! Storage boundaries for profiles and the roster.
//!
//! This module provides:
//! - `ProfileStore`: profile records keyed by the provider-owned user ID
//! - `DirectoryStore`: the roster operations the staff screens drive
//! - `InMemoryDirectory`: an in-process implementation of both, used in
//!   development and tests, that also implements the session router's
//!   role-resolution hook

use crate::error::DirectoryError;
use crate::profile::UserProfile;
use crate::roster::{GradeLevel, NewStudent, Student};
use async_trait::async_trait;
use aula_core::{GradeId, Role, StudentId, UserId};
use aula_session::{RoleLookupError, RoleSource};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::debug;

/// Profile records keyed by user ID.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Fetches the profile stored for `user_id`, if any.
    async fn fetch_profile(
        &self,
        user_id: &UserId,
    ) -> Result<Option<UserProfile>, DirectoryError>;

    /// Creates or replaces the profile record.
    async fn store_profile(&self, profile: &UserProfile) -> Result<(), DirectoryError>;
}

/// Roster operations for the staff management screens.
#[async_trait]
pub trait DirectoryStore: Send + Sync {
    /// Grade levels with at least one open seat, ordered by ascending
    /// year.
    async fn grades_with_open_seats(&self) -> Result<Vec<GradeLevel>, DirectoryError>;

    /// Enrolls a student, taking one seat in the target grade.
    ///
    /// # Errors
    ///
    /// Returns `GradeNotFound` for an unknown grade and `GradeFull` when
    /// no seat is open; neither changes any stored state.
    async fn add_student(&self, new_student: NewStudent) -> Result<Student, DirectoryError>;

    /// All enrolled students.
    async fn students(&self) -> Result<Vec<Student>, DirectoryError>;

    /// Students linked to a tutor account.
    async fn students_of_tutor(&self, tutor: &UserId) -> Result<Vec<Student>, DirectoryError>;

    /// Removes a student, freeing their seat.
    async fn remove_student(&self, student: StudentId) -> Result<(), DirectoryError>;
}

#[derive(Default)]
struct DirectoryState {
    profiles: HashMap<UserId, UserProfile>,
    grades: HashMap<GradeId, GradeLevel>,
    students: HashMap<StudentId, Student>,
}

/// In-process directory backend.
///
/// Keeps everything behind one read-write lock; the lock is never held
/// across an await. Cheap to clone; clones share the same state.
#[derive(Clone, Default)]
pub struct InMemoryDirectory {
    state: Arc<RwLock<DirectoryState>>,
}

impl InMemoryDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a grade level, returning its ID.
    pub fn insert_grade(&self, grade: GradeLevel) -> GradeId {
        let id = grade.id;
        self.state.write().unwrap().grades.insert(id, grade);
        id
    }

    /// Returns a grade level by ID.
    #[must_use]
    pub fn grade(&self, id: GradeId) -> Option<GradeLevel> {
        self.state.read().unwrap().grades.get(&id).cloned()
    }
}

#[async_trait]
impl ProfileStore for InMemoryDirectory {
    async fn fetch_profile(
        &self,
        user_id: &UserId,
    ) -> Result<Option<UserProfile>, DirectoryError> {
        Ok(self.state.read().unwrap().profiles.get(user_id).cloned())
    }

    async fn store_profile(&self, profile: &UserProfile) -> Result<(), DirectoryError> {
        debug!(user_id = %profile.user_id(), "storing profile");
        self.state
            .write()
            .unwrap()
            .profiles
            .insert(profile.user_id().clone(), profile.clone());
        Ok(())
    }
}

#[async_trait]
impl DirectoryStore for InMemoryDirectory {
    async fn grades_with_open_seats(&self) -> Result<Vec<GradeLevel>, DirectoryError> {
        let mut grades: Vec<GradeLevel> = self
            .state
            .read()
            .unwrap()
            .grades
            .values()
            .filter(|grade| grade.has_open_seats())
            .cloned()
            .collect();
        grades.sort_by_key(|grade| grade.year);
        Ok(grades)
    }

    async fn add_student(&self, new_student: NewStudent) -> Result<Student, DirectoryError> {
        let mut state = self.state.write().unwrap();

        let grade = state
            .grades
            .get_mut(&new_student.grade)
            .ok_or(DirectoryError::GradeNotFound {
                grade: new_student.grade,
            })?;
        if !grade.has_open_seats() {
            return Err(DirectoryError::GradeFull {
                grade: new_student.grade,
            });
        }
        grade.seats_available -= 1;

        let student = Student {
            id: StudentId::new(),
            first_name: new_student.first_name,
            last_name: new_student.last_name,
            grade: new_student.grade,
            tutor: new_student.tutor,
            enrolled_at: Utc::now(),
        };
        debug!(student = %student.id, grade = %student.grade, "student enrolled");
        state.students.insert(student.id, student.clone());
        Ok(student)
    }

    async fn students(&self) -> Result<Vec<Student>, DirectoryError> {
        let mut students: Vec<Student> =
            self.state.read().unwrap().students.values().cloned().collect();
        students.sort_by_key(|student| student.enrolled_at);
        Ok(students)
    }

    async fn students_of_tutor(&self, tutor: &UserId) -> Result<Vec<Student>, DirectoryError> {
        let mut students: Vec<Student> = self
            .state
            .read()
            .unwrap()
            .students
            .values()
            .filter(|student| student.tutor.as_ref() == Some(tutor))
            .cloned()
            .collect();
        students.sort_by_key(|student| student.enrolled_at);
        Ok(students)
    }

    async fn remove_student(&self, student: StudentId) -> Result<(), DirectoryError> {
        let mut state = self.state.write().unwrap();

        let removed = state
            .students
            .remove(&student)
            .ok_or(DirectoryError::StudentNotFound { student })?;
        if let Some(grade) = state.grades.get_mut(&removed.grade) {
            grade.seats_available = (grade.seats_available + 1).min(grade.seats_total);
        }
        debug!(student = %student, "student removed");
        Ok(())
    }
}

/// The session router's role hook, answered from the profile record.
#[async_trait]
impl RoleSource for InMemoryDirectory {
    async fn role_for(&self, user_id: &UserId) -> Result<Option<Role>, RoleLookupError> {
        let profile = self
            .fetch_profile(user_id)
            .await
            .map_err(|e| RoleLookupError {
                reason: e.to_string(),
            })?;
        Ok(profile.and_then(|p| p.role()))
    }
}
