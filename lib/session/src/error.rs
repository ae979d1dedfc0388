//! Error types for the session crate.
//!
//! The taxonomy separates three situations with different audiences:
//! - `AuthOperationFailed`: a provider call failed; shown to the user as a
//!   message keyed by the wrapped kind
//! - `NotPermitted`: a routing contract violation; logged, never shown
//! - `AuthStateUnavailable`: a transient notification failure; the last
//!   known state remains authoritative

use crate::auth_state::AuthState;
use crate::provider::AuthError;
use crate::route::Route;
use std::fmt;

/// Errors from session router operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    /// A provider operation failed. The state is unchanged and the caller
    /// may retry by re-submitting.
    AuthOperationFailed { source: AuthError },
    /// Attempted navigation to a route disallowed by the current state.
    NotPermitted { route: Route, state: AuthState },
    /// The provider failed to deliver a state notification; the last
    /// known state remains authoritative.
    AuthStateUnavailable { source: AuthError },
}

impl fmt::Display for RouterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AuthOperationFailed { source } => {
                write!(f, "auth operation failed: {source}")
            }
            Self::NotPermitted { route, state } => {
                write!(
                    f,
                    "route {} not permitted while {}",
                    route.name(),
                    state.describe()
                )
            }
            Self::AuthStateUnavailable { source } => {
                write!(f, "auth state unavailable: {source}")
            }
        }
    }
}

impl std::error::Error for RouterError {}
