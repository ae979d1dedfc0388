//! The authentication state machine.
//!
//! `AuthState` is process-scoped: it starts as `Unknown` at process start,
//! transitions only when the identity provider reports a change, and is
//! discarded on restart. It is deliberately not persisted anywhere; the
//! remembered-login cache (`crate::remembered`) is an unrelated value and
//! must never be read as authentication.

use crate::provider::AuthError;
use aula_core::UserId;

/// The router's view of the user's authentication status.
///
/// Exactly one variant is active at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    /// The identity provider has not reported yet; no route decision can
    /// be made.
    Unknown,
    /// No authenticated user.
    Anonymous,
    /// A user is signed in.
    Authenticated {
        /// Opaque stable identifier owned by the identity provider.
        user_id: UserId,
    },
}

impl AuthState {
    /// Returns true once the provider has reported at least once.
    #[must_use]
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// Returns true if a user is signed in.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    /// Returns the signed-in user's ID, if any.
    #[must_use]
    pub fn user_id(&self) -> Option<&UserId> {
        match self {
            Self::Authenticated { user_id } => Some(user_id),
            _ => None,
        }
    }

    /// Short name for log fields.
    #[must_use]
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Anonymous => "anonymous",
            Self::Authenticated { .. } => "authenticated",
        }
    }
}

/// A single auth-state-change notification from the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthChange {
    /// A user signed in (or a session was restored).
    SignedIn { user_id: UserId },
    /// The session ended, locally or externally.
    SignedOut,
}

impl AuthChange {
    /// The state this notification transitions the router into.
    #[must_use]
    pub fn into_state(self) -> AuthState {
        match self {
            Self::SignedIn { user_id } => AuthState::Authenticated { user_id },
            Self::SignedOut => AuthState::Anonymous,
        }
    }
}

/// Payload delivered on the provider's notification channel.
///
/// `Unavailable` reports a delivery failure without a state change: the
/// last known `AuthState` remains authoritative until the next successful
/// notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthSignal {
    /// The authentication state changed.
    Changed(AuthChange),
    /// The provider failed to deliver a notification.
    Unavailable(AuthError),
}
