//! User-facing message mapping.
//!
//! Every provider error kind and validation rule maps to fixed Spanish
//! copy keyed by kind; raw backend error text never reaches the user.
//! The `Unknown` kind falls back to a per-flow generic message.

use crate::validate::ValidationError;
use aula_session::AuthError;

/// The account flow a message is shown in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Credential sign-in.
    Login,
    /// Account creation.
    SignUp,
    /// Password-reset request.
    PasswordReset,
}

impl Flow {
    /// Generic fallback copy for provider errors without dedicated copy.
    #[must_use]
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::Login => "Hubo un problema al iniciar sesión.",
            Self::SignUp => "Hubo un problema al registrar el usuario.",
            Self::PasswordReset => {
                "Hubo un problema al enviar el correo de restablecimiento."
            }
        }
    }

    /// Copy for the flow's missing-required-fields case.
    #[must_use]
    pub fn missing_fields_message(&self) -> &'static str {
        match self {
            Self::Login => "Por favor ingrese ambos campos.",
            Self::SignUp => "Todos los campos son obligatorios.",
            Self::PasswordReset => "Por favor ingrese su correo electrónico.",
        }
    }
}

/// Copy for a provider error, keyed by kind.
#[must_use]
pub fn auth_message(flow: Flow, error: &AuthError) -> &'static str {
    match error {
        AuthError::InvalidIdentifier => "El formato del correo electrónico no es válido.",
        AuthError::WrongSecret => "La contraseña es incorrecta.",
        AuthError::IdentifierNotFound => "No se encontró un usuario con este correo.",
        AuthError::IdentifierInUse => "El correo electrónico ya está en uso.",
        AuthError::WeakSecret => "La contraseña es demasiado débil.",
        AuthError::NetworkUnavailable => "Error de conexión, por favor intenta más tarde.",
        AuthError::RateLimited => {
            "Demasiados intentos. Por favor espera antes de intentar nuevamente."
        }
        AuthError::Unknown { .. } => flow.fallback_message(),
    }
}

/// Copy for a failed client-side validation.
#[must_use]
pub fn validation_message(flow: Flow, error: &ValidationError) -> String {
    match error {
        ValidationError::MissingField { .. } => flow.missing_fields_message().to_string(),
        ValidationError::InvalidEmail => {
            "Por favor ingrese un correo electrónico válido.".to_string()
        }
        ValidationError::DomainNotAllowed { .. } => {
            "El correo no pertenece a un dominio autorizado.".to_string()
        }
        ValidationError::PasswordTooShort { min_len } => format!(
            "La contraseña debe tener al menos {min_len} caracteres, \
             incluyendo una letra mayúscula, una minúscula y un número."
        ),
        ValidationError::PasswordMissingLowercase
        | ValidationError::PasswordMissingUppercase
        | ValidationError::PasswordMissingDigit
        | ValidationError::PasswordNotAlphanumeric => {
            "La contraseña debe incluir una letra mayúscula, una minúscula y un número."
                .to_string()
        }
        ValidationError::PasswordMismatch => "Las contraseñas no coinciden.".to_string(),
    }
}
