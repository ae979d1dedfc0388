//! The password-reset form.
//!
//! Requires and shape-checks the email before asking the provider to
//! send the reset message. Success carries no data; the user continues
//! on the login screen.

use crate::error::FormError;
use crate::validate::{ValidationError, require, validate_email};
use aula_session::IdentityProvider;
use tracing::debug;

/// Password-reset form state.
#[derive(Debug, Clone, Default)]
pub struct PasswordResetForm {
    /// Account email to send the reset message to.
    pub email: String,
}

impl PasswordResetForm {
    /// Creates an empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates the email field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("email", &self.email)?;
        validate_email(&self.email)
    }

    /// Validates and requests the reset message.
    pub async fn submit(&self, provider: &dyn IdentityProvider) -> Result<(), FormError> {
        self.validate().map_err(FormError::Invalid)?;

        provider
            .request_password_reset(self.email.trim())
            .await
            .map_err(FormError::Auth)?;
        debug!("password reset requested");
        Ok(())
    }
}
