//! User profile records.
//!
//! Profiles are stored in the external database keyed by the
//! provider-owned user ID. They carry the display fields the screens
//! show (name, photo) and the account role; accounts without an explicit
//! role are tutors.

use aula_core::{Role, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user's profile record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// The provider-owned user ID this profile belongs to.
    user_id: UserId,
    /// Given name.
    first_name: String,
    /// Family name.
    last_name: String,
    /// Contact email, if stored alongside the profile.
    email: Option<String>,
    /// Profile photo location, if one was uploaded.
    photo_url: Option<String>,
    /// Account role; `None` means the account is a plain tutor account.
    role: Option<Role>,
    /// When the profile record was created.
    created_at: DateTime<Utc>,
    /// When the profile record was last updated.
    updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Creates a new profile for a freshly signed-up account.
    #[must_use]
    pub fn new(user_id: UserId, first_name: String, last_name: String) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            first_name,
            last_name,
            email: None,
            photo_url: None,
            role: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Creates a profile with all fields specified.
    ///
    /// Use this when reconstituting a profile from storage.
    #[must_use]
    #[expect(clippy::too_many_arguments)]
    pub fn with_all_fields(
        user_id: UserId,
        first_name: String,
        last_name: String,
        email: Option<String>,
        photo_url: Option<String>,
        role: Option<Role>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id,
            first_name,
            last_name,
            email,
            photo_url,
            role,
            created_at,
            updated_at,
        }
    }

    /// Returns the provider-owned user ID.
    #[must_use]
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns the given name.
    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Returns the family name.
    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Returns the full display name.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Returns the contact email, if stored.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Returns the profile photo location, if stored.
    #[must_use]
    pub fn photo_url(&self) -> Option<&str> {
        self.photo_url.as_deref()
    }

    /// Returns the stored role, if the account carries one.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.role
    }

    /// Returns the effective role: the stored one, or tutor.
    #[must_use]
    pub fn role_or_default(&self) -> Role {
        self.role.unwrap_or_default()
    }

    /// Returns when the profile record was created.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns when the profile record was last updated.
    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Sets the contact email.
    pub fn set_email(&mut self, email: Option<String>) {
        self.email = email;
        self.updated_at = Utc::now();
    }

    /// Sets the profile photo location.
    pub fn set_photo_url(&mut self, photo_url: Option<String>) {
        self.photo_url = photo_url;
        self.updated_at = Utc::now();
    }

    /// Sets the account role.
    pub fn set_role(&mut self, role: Option<Role>) {
        self.role = role;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> UserProfile {
        UserProfile::new("u1".into(), "María".to_string(), "García".to_string())
    }

    #[test]
    fn new_profile_has_no_role() {
        let profile = profile();

        assert_eq!(profile.user_id().as_str(), "u1");
        assert_eq!(profile.role(), None);
        assert_eq!(profile.role_or_default(), Role::Tutor);
        assert!(profile.email().is_none());
        assert!(profile.photo_url().is_none());
    }

    #[test]
    fn display_name_joins_names() {
        assert_eq!(profile().display_name(), "María García");
    }

    #[test]
    fn setters_bump_updated_at() {
        let mut profile = profile();
        let created = profile.updated_at();

        std::thread::sleep(std::time::Duration::from_millis(10));
        profile.set_role(Some(Role::Staff));

        assert_eq!(profile.role(), Some(Role::Staff));
        assert_eq!(profile.role_or_default(), Role::Staff);
        assert!(profile.updated_at() > created);
    }

    #[test]
    fn photo_url_round_trips() {
        let mut profile = profile();
        profile.set_photo_url(Some("https://cdn.example/u1.jpg".to_string()));
        assert_eq!(profile.photo_url(), Some("https://cdn.example/u1.jpg"));

        profile.set_photo_url(None);
        assert!(profile.photo_url().is_none());
    }

    #[test]
    fn profile_serialization_roundtrip() {
        let mut profile = profile();
        profile.set_email(Some("maria@escuela.edu.mx".to_string()));
        profile.set_role(Some(Role::Staff));

        let json = serde_json::to_string(&profile).expect("serialize");
        let parsed: UserProfile = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(profile, parsed);
    }
}
