//! The remembered-login convenience cache.
//!
//! A single identifier string persisted across app restarts: written when
//! the user opts in on the login form, cleared when they opt out. It only
//! pre-fills a form field. It is never proof of authentication and has no
//! effect on `AuthState`; nothing in this crate converts between the two.

use async_trait::async_trait;
use std::fmt;
use std::sync::Mutex;

/// Errors from the local preference store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreferenceError {
    /// The stored value could not be read.
    ReadFailed { reason: String },
    /// The value could not be written.
    WriteFailed { reason: String },
}

impl fmt::Display for PreferenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadFailed { reason } => write!(f, "preference read failed: {reason}"),
            Self::WriteFailed { reason } => write!(f, "preference write failed: {reason}"),
        }
    }
}

impl std::error::Error for PreferenceError {}

/// Local persistence for the remembered login identifier.
///
/// Implementations wrap the platform's local storage. Values are
/// non-sensitive convenience data only; secrets must never be stored
/// here.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Returns the remembered identifier, if one was stored.
    async fn remembered_identifier(&self) -> Result<Option<String>, PreferenceError>;

    /// Stores the identifier, or clears it when `value` is `None`.
    async fn set_remembered_identifier(
        &self,
        value: Option<&str>,
    ) -> Result<(), PreferenceError>;
}

/// In-process preference store.
///
/// Development and test stand-in for platform-backed storage; values do
/// not survive a restart.
#[derive(Debug, Default)]
pub struct InMemoryPreferences {
    value: Mutex<Option<String>>,
}

impl InMemoryPreferences {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PreferenceStore for InMemoryPreferences {
    async fn remembered_identifier(&self) -> Result<Option<String>, PreferenceError> {
        Ok(self.value.lock().unwrap().clone())
    }

    async fn set_remembered_identifier(
        &self,
        value: Option<&str>,
    ) -> Result<(), PreferenceError> {
        *self.value.lock().unwrap() = value.map(str::to_string);
        Ok(())
    }
}
