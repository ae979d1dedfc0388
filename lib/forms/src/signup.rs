//! The sign-up form.
//!
//! Validation order mirrors what the user sees on screen: required
//! fields first, then confirmation match, then password strength, then
//! the email checks. The first failure is returned; the provider is only
//! reached once everything passes locally.

use crate::error::FormError;
use crate::policy::SignUpPolicy;
use crate::validate::{
    ValidationError, require, validate_email, validate_email_domain, validate_password,
    validate_password_confirmation,
};
use aula_core::UserId;
use aula_session::{IdentityProvider, NewAccount};
use tracing::debug;

/// Sign-up form state.
#[derive(Debug, Clone, Default)]
pub struct SignUpForm {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Account email.
    pub email: String,
    /// Chosen password.
    pub password: String,
    /// Password confirmation.
    pub confirmation: String,
}

impl SignUpForm {
    /// Creates an empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates all fields against the policy.
    pub fn validate(&self, policy: &SignUpPolicy) -> Result<(), ValidationError> {
        require("first_name", &self.first_name)?;
        require("last_name", &self.last_name)?;
        require("email", &self.email)?;
        require("password", &self.password)?;
        require("confirmation", &self.confirmation)?;
        validate_password_confirmation(&self.password, &self.confirmation)?;
        validate_password(&self.password, &policy.password)?;
        validate_email(&self.email)?;
        validate_email_domain(&self.email, &policy.allowed_email_domains)
    }

    /// Validates and creates the account.
    pub async fn submit(
        &self,
        provider: &dyn IdentityProvider,
        policy: &SignUpPolicy,
    ) -> Result<UserId, FormError> {
        self.validate(policy).map_err(FormError::Invalid)?;

        let user_id = provider
            .sign_up(
                self.email.trim(),
                &self.password,
                NewAccount {
                    first_name: self.first_name.trim().to_string(),
                    last_name: self.last_name.trim().to_string(),
                },
            )
            .await
            .map_err(FormError::Auth)?;
        debug!(user_id = %user_id, "sign-up accepted");
        Ok(user_id)
    }
}
