//! Client-side field validators.
//!
//! These run before any provider call so the user gets immediate
//! feedback and obviously-invalid requests never leave the device. The
//! provider still applies its own rules; client and provider disagreeing
//! surfaces as an `AuthError`, not a validation error.

use crate::policy::PasswordRules;
use std::fmt;

/// A failed client-side validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is empty.
    MissingField { field: &'static str },
    /// The value does not look like an email address.
    InvalidEmail,
    /// The email's domain is not on the allow-list.
    DomainNotAllowed { domain: String },
    /// The password is shorter than the policy minimum.
    PasswordTooShort { min_len: usize },
    /// The password has no lowercase letter.
    PasswordMissingLowercase,
    /// The password has no uppercase letter.
    PasswordMissingUppercase,
    /// The password has no digit.
    PasswordMissingDigit,
    /// The password contains characters outside letters and digits.
    PasswordNotAlphanumeric,
    /// Password and confirmation differ.
    PasswordMismatch,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField { field } => write!(f, "required field missing: {field}"),
            Self::InvalidEmail => write!(f, "not a valid email address"),
            Self::DomainNotAllowed { domain } => {
                write!(f, "email domain not allowed: {domain}")
            }
            Self::PasswordTooShort { min_len } => {
                write!(f, "password shorter than {min_len} characters")
            }
            Self::PasswordMissingLowercase => write!(f, "password needs a lowercase letter"),
            Self::PasswordMissingUppercase => write!(f, "password needs an uppercase letter"),
            Self::PasswordMissingDigit => write!(f, "password needs a digit"),
            Self::PasswordNotAlphanumeric => {
                write!(f, "password limited to letters and digits")
            }
            Self::PasswordMismatch => write!(f, "passwords do not match"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Requires a non-empty value (after trimming).
pub fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::MissingField { field })
    } else {
        Ok(())
    }
}

/// Checks the email shape: one `@`, no whitespace, and a dot with
/// characters on both sides somewhere in the domain.
pub fn validate_email(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidEmail);
    }

    let mut parts = value.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(ValidationError::InvalidEmail);
    };
    if local.is_empty() || domain.is_empty() {
        return Err(ValidationError::InvalidEmail);
    }

    let has_inner_dot = domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i < domain.len() - 1);
    if !has_inner_dot {
        return Err(ValidationError::InvalidEmail);
    }

    Ok(())
}

/// Checks the email's domain against an allow-list.
///
/// An empty allow-list permits any domain. Comparison is
/// case-insensitive; the caller should validate the shape first.
pub fn validate_email_domain(value: &str, allowed: &[String]) -> Result<(), ValidationError> {
    if allowed.is_empty() {
        return Ok(());
    }

    let domain = value
        .trim()
        .rsplit_once('@')
        .map(|(_, domain)| domain)
        .ok_or(ValidationError::InvalidEmail)?;

    if allowed.iter().any(|a| a.eq_ignore_ascii_case(domain)) {
        Ok(())
    } else {
        Err(ValidationError::DomainNotAllowed {
            domain: domain.to_string(),
        })
    }
}

/// Checks password strength against the policy rules.
pub fn validate_password(value: &str, rules: &PasswordRules) -> Result<(), ValidationError> {
    if value.chars().count() < rules.min_len {
        return Err(ValidationError::PasswordTooShort {
            min_len: rules.min_len,
        });
    }
    if rules.require_lowercase && !value.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(ValidationError::PasswordMissingLowercase);
    }
    if rules.require_uppercase && !value.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(ValidationError::PasswordMissingUppercase);
    }
    if rules.require_digit && !value.chars().any(|c| c.is_ascii_digit()) {
        return Err(ValidationError::PasswordMissingDigit);
    }
    if rules.alphanumeric_only && !value.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ValidationError::PasswordNotAlphanumeric);
    }
    Ok(())
}

/// Checks that the confirmation matches the password.
pub fn validate_password_confirmation(
    password: &str,
    confirmation: &str,
) -> Result<(), ValidationError> {
    if password == confirmation {
        Ok(())
    } else {
        Err(ValidationError::PasswordMismatch)
    }
}
