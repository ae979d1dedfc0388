//! Account form flows for the aula-movil school portal client.
//!
//! This crate provides:
//! - Client-side validators (`validate`): required fields, email shape,
//!   email-domain allow-list, password strength
//! - The configurable sign-up policy (`SignUpPolicy`)
//! - Form state and submit flows for login, sign-up, and password reset
//! - User-facing message mapping (`messages`) keyed by error kind
//!
//! Forms talk to the identity provider through the
//! [`aula_session::IdentityProvider`] seam and never interpret the
//! session state themselves: a successful submit only means the provider
//! accepted the operation, and the session router reacts to the resulting
//! notification.

pub mod error;
pub mod login;
pub mod messages;
pub mod policy;
pub mod reset;
pub mod signup;
pub mod validate;

// Re-export main types at crate root
pub use error::FormError;
pub use login::LoginForm;
pub use messages::Flow;
pub use policy::{PasswordRules, SignUpPolicy};
pub use reset::PasswordResetForm;
pub use signup::SignUpForm;
pub use validate::ValidationError;
