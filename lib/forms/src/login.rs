//! The login form.
//!
//! Holds the credential fields and the remember-me switch, pre-fills the
//! identifier from the preference store, and submits against the
//! identity provider. A successful submit returns the provider-issued
//! user ID; the session transition itself arrives through the router's
//! subscription, not here.

use crate::error::FormError;
use crate::validate::{ValidationError, require};
use aula_core::UserId;
use aula_session::{IdentityProvider, PreferenceStore};
use tracing::{debug, warn};

/// Login form state.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    /// Account identifier (email).
    pub identifier: String,
    /// Account secret (password).
    pub secret: String,
    /// Whether to remember the identifier for the next start.
    pub remember_me: bool,
}

impl LoginForm {
    /// Creates an empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a form pre-filled from the remembered identifier.
    ///
    /// When an identifier was stored the remember-me switch starts on. A
    /// failed read degrades to an empty form; pre-fill is convenience
    /// only.
    pub async fn prefill(preferences: &dyn PreferenceStore) -> Self {
        match preferences.remembered_identifier().await {
            Ok(Some(identifier)) => Self {
                identifier,
                secret: String::new(),
                remember_me: true,
            },
            Ok(None) => Self::new(),
            Err(error) => {
                warn!(error = %error, "could not read remembered identifier");
                Self::new()
            }
        }
    }

    /// Validates the required fields.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("email", &self.identifier)?;
        require("password", &self.secret)
    }

    /// Validates and signs in, then updates the remembered identifier
    /// according to the remember-me switch.
    pub async fn submit(
        &self,
        provider: &dyn IdentityProvider,
        preferences: &dyn PreferenceStore,
    ) -> Result<UserId, FormError> {
        self.validate().map_err(FormError::Invalid)?;

        let identifier = self.identifier.trim();
        let user_id = provider
            .sign_in(identifier, &self.secret)
            .await
            .map_err(FormError::Auth)?;
        debug!(user_id = %user_id, "sign-in accepted");

        // The cache is convenience only: a storage failure must not turn
        // a successful sign-in into an error.
        let remembered = self.remember_me.then_some(identifier);
        if let Err(error) = preferences.set_remembered_identifier(remembered).await {
            warn!(error = %error, "could not update remembered identifier");
        }

        Ok(user_id)
    }
}
