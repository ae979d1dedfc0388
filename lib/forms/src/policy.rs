//! Sign-up policy configuration.
//!
//! Loaded via the `config` crate from `AULA__`-prefixed environment
//! variables, with defaults matching the portal's standing rules.
//! Fields with defaults can be omitted when loading from the
//! environment.

use serde::Deserialize;

/// Password strength rules applied by the sign-up form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PasswordRules {
    /// Minimum password length.
    /// Default: 6
    #[serde(default = "default_min_len")]
    pub min_len: usize,
    /// Require at least one lowercase letter.
    /// Default: true
    #[serde(default = "default_true")]
    pub require_lowercase: bool,
    /// Require at least one uppercase letter.
    /// Default: true
    #[serde(default = "default_true")]
    pub require_uppercase: bool,
    /// Require at least one digit.
    /// Default: true
    #[serde(default = "default_true")]
    pub require_digit: bool,
    /// Restrict passwords to letters and digits.
    /// Default: true
    #[serde(default = "default_true")]
    pub alphanumeric_only: bool,
}

fn default_min_len() -> usize {
    6
}

fn default_true() -> bool {
    true
}

impl Default for PasswordRules {
    fn default() -> Self {
        Self {
            min_len: default_min_len(),
            require_lowercase: default_true(),
            require_uppercase: default_true(),
            require_digit: default_true(),
            alphanumeric_only: default_true(),
        }
    }
}

/// Sign-up form policy.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct SignUpPolicy {
    /// Password strength rules.
    #[serde(default)]
    pub password: PasswordRules,
    /// Email domains allowed to register. Empty permits any domain.
    #[serde(default)]
    pub allowed_email_domains: Vec<String>,
}

impl SignUpPolicy {
    /// Loads the policy from `AULA__`-prefixed environment variables.
    ///
    /// For example `AULA__PASSWORD__MIN_LEN=8` or
    /// `AULA__ALLOWED_EMAIL_DOMAINS=escuela.edu.mx`.
    ///
    /// # Errors
    ///
    /// Returns an error if a present variable fails to parse.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(
                config::Environment::with_prefix("AULA")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("allowed_email_domains"),
            )
            .build()?
            .try_deserialize()
    }
}
