//! The identity provider boundary.
//!
//! All account operations are delegated to an external identity provider.
//! This module defines the abstract contract any backend must satisfy:
//! credentialed operations returning provider-issued user IDs, and an
//! auth-state-change subscription that pushes notifications in occurrence
//! order, starting with one immediate notification of the current state.

use crate::auth_state::AuthSignal;
use async_trait::async_trait;
use aula_core::UserId;
use std::fmt;

/// Errors reported by the identity provider.
///
/// These are the only provider failures the client distinguishes; anything
/// else arrives as `Unknown` carrying the provider's own code so it can be
/// logged without ever being shown to the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The identifier is malformed (e.g. not an email address).
    InvalidIdentifier,
    /// The secret does not match the account.
    WrongSecret,
    /// No account exists for the identifier.
    IdentifierNotFound,
    /// An account already exists for the identifier.
    IdentifierInUse,
    /// The secret does not meet the provider's strength requirements.
    WeakSecret,
    /// The provider could not be reached.
    NetworkUnavailable,
    /// Too many attempts; the provider is throttling.
    RateLimited,
    /// Any other provider failure, carrying the provider's own code.
    Unknown { code: String },
}

impl AuthError {
    /// The provider-style code for this error kind.
    ///
    /// Stable across backends; used for logging and message lookup.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::InvalidIdentifier => "auth/invalid-identifier",
            Self::WrongSecret => "auth/wrong-secret",
            Self::IdentifierNotFound => "auth/identifier-not-found",
            Self::IdentifierInUse => "auth/identifier-in-use",
            Self::WeakSecret => "auth/weak-secret",
            Self::NetworkUnavailable => "auth/network-unavailable",
            Self::RateLimited => "auth/rate-limited",
            Self::Unknown { code } => code,
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidIdentifier => write!(f, "identifier is not valid"),
            Self::WrongSecret => write!(f, "secret does not match"),
            Self::IdentifierNotFound => write!(f, "no account for identifier"),
            Self::IdentifierInUse => write!(f, "identifier already in use"),
            Self::WeakSecret => write!(f, "secret is too weak"),
            Self::NetworkUnavailable => write!(f, "identity provider unreachable"),
            Self::RateLimited => write!(f, "too many attempts"),
            Self::Unknown { code } => write!(f, "provider error: {code}"),
        }
    }
}

impl std::error::Error for AuthError {}

/// Profile fields collected by the sign-up form.
///
/// Forwarded to the provider (and, through it, the profile store); the
/// router never reads these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
}

/// Callback invoked by the provider on every auth-state change.
pub type AuthCallback = Box<dyn Fn(AuthSignal) + Send + Sync>;

/// Unsubscribe handle returned by [`IdentityProvider::subscribe_auth_state`].
///
/// Cancelling (or dropping) the handle removes the callback at the
/// provider; it does not fence notifications already queued on the client
/// side. The router layers its own fence on top for that.
pub struct ProviderSubscription {
    unsubscribe: Option<Box<dyn FnOnce() + Send>>,
}

impl ProviderSubscription {
    /// Creates a handle that runs `unsubscribe` once on cancel or drop.
    #[must_use]
    pub fn new(unsubscribe: impl FnOnce() + Send + 'static) -> Self {
        Self {
            unsubscribe: Some(Box::new(unsubscribe)),
        }
    }

    /// Removes the callback at the provider. Safe to call more than once.
    pub fn cancel(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }

    /// Returns true if `cancel` has not run yet.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.unsubscribe.is_some()
    }
}

impl Drop for ProviderSubscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl fmt::Debug for ProviderSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderSubscription")
            .field("active", &self.is_active())
            .finish()
    }
}

/// Abstract contract for the external identity provider.
///
/// Implementations wrap a concrete backend SDK. The notification contract
/// matters more than the operations: `subscribe_auth_state` must invoke
/// the callback once immediately with the current state and again on every
/// subsequent change, preserving occurrence order.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Authenticates with an identifier and secret.
    async fn sign_in(&self, identifier: &str, secret: &str) -> Result<UserId, AuthError>;

    /// Creates an account and authenticates it.
    async fn sign_up(
        &self,
        identifier: &str,
        secret: &str,
        account: NewAccount,
    ) -> Result<UserId, AuthError>;

    /// Ends the current session. The resulting state change is delivered
    /// through the subscription, not returned here.
    async fn sign_out(&self) -> Result<(), AuthError>;

    /// Sends a password-reset message to the identifier.
    async fn request_password_reset(&self, identifier: &str) -> Result<(), AuthError>;

    /// Registers `callback` for auth-state changes.
    fn subscribe_auth_state(&self, callback: AuthCallback) -> ProviderSubscription;
}
