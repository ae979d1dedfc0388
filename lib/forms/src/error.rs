//! Error types for the forms crate.

use crate::messages::{self, Flow};
use crate::validate::ValidationError;
use aula_session::AuthError;
use std::fmt;

/// Errors from a form submit.
///
/// Validation errors never reach the provider; provider errors are
/// returned to the caller for display and are never retried
/// automatically. The user re-submits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// A client-side validation failed.
    Invalid(ValidationError),
    /// The identity provider rejected the operation.
    Auth(AuthError),
}

impl FormError {
    /// The message to show the user, localized and keyed by kind.
    #[must_use]
    pub fn user_message(&self, flow: Flow) -> String {
        match self {
            Self::Invalid(error) => messages::validation_message(flow, error),
            Self::Auth(error) => messages::auth_message(flow, error).to_string(),
        }
    }
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid(error) => write!(f, "validation failed: {error}"),
            Self::Auth(error) => write!(f, "provider rejected: {error}"),
        }
    }
}

impl std::error::Error for FormError {}
