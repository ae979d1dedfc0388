//! Account roles for the school portal.
//!
//! The portal distinguishes two kinds of accounts: tutors (parents or
//! guardians following their students) and administrative staff. The role
//! is stored on the user's profile record; accounts without an explicit
//! role are treated as tutors.

use serde::{Deserialize, Serialize};

/// Account role, resolved from the user's profile record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Tutor (parent/guardian) following enrolled students.
    Tutor,
    /// Administrative staff managing students and tutors.
    Staff,
}

impl Role {
    /// Returns true if this role has staff privileges.
    #[must_use]
    pub fn is_staff(&self) -> bool {
        matches!(self, Self::Staff)
    }
}

impl Default for Role {
    fn default() -> Self {
        Self::Tutor
    }
}
