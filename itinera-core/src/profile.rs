//! Profile records owned by the document store.
//!
//! A [`Profile`] is the application-owned half of an account. It is keyed
//! logically by email; the store-assigned [`ProfileId`] is only a handle for
//! updates and deletes. There is no foreign key to the identity: the two are
//! coupled by email equality alone, and either side can exist without the
//! other after a partial failure.
//!
//! | Field             | Type            | Description                                    |
//! | ----------------- | --------------- | ---------------------------------------------- |
//! | `id`              | `ProfileId`     | Store-assigned handle, opaque.                 |
//! | `name`            | `String`        | Display name shown in the UI.                  |
//! | `email`           | `String`        | Logical key; at most one profile per email.    |
//! | `password_digest` | `String`        | Locally computed hash, write-only audit field. |
//! | `is_verified`     | `bool`          | Lazy mirror of the provider's verified flag.   |
//! | `created_at`      | `DateTime<Utc>` | Set by the store at insert.                    |

use crate::{
    Error,
    error::ValidationError,
    id::{generate_prefixed_id, validate_prefixed_id},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A store-assigned handle to a profile record. Opaque; only used to address
/// updates and deletes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct ProfileId(String);

impl ProfileId {
    pub fn new(id: &str) -> Self {
        ProfileId(id.to_string())
    }

    pub fn new_random() -> Self {
        ProfileId(generate_prefixed_id("prf"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_valid(&self) -> bool {
        validate_prefixed_id(&self.0, "prf")
    }
}

impl From<&str> for ProfileId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for ProfileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The application-owned account record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: ProfileId,
    pub name: String,
    pub email: String,

    /// Locally computed password hash, kept as a denormalized audit field.
    /// Never read back and never used for authentication decisions; the
    /// provider owns the real credential.
    pub password_digest: String,

    /// Mirror of the identity's verified flag, updated lazily at login. Only
    /// ever set true. Informational only; access decisions always consult the
    /// identity, never this field.
    pub is_verified: bool,

    pub created_at: DateTime<Utc>,
}

/// A profile record about to be inserted. The store assigns the id and the
/// creation timestamp.
#[derive(Debug, Clone)]
pub struct NewProfile {
    pub name: String,
    pub email: String,
    pub password_digest: String,
}

impl NewProfile {
    pub fn builder() -> NewProfileBuilder {
        NewProfileBuilder::default()
    }
}

#[derive(Default)]
pub struct NewProfileBuilder {
    name: Option<String>,
    email: Option<String>,
    password_digest: Option<String>,
}

impl NewProfileBuilder {
    pub fn name(mut self, name: String) -> Self {
        self.name = Some(name);
        self
    }

    pub fn email(mut self, email: String) -> Self {
        self.email = Some(email);
        self
    }

    pub fn password_digest(mut self, digest: String) -> Self {
        self.password_digest = Some(digest);
        self
    }

    pub fn build(self) -> Result<NewProfile, Error> {
        Ok(NewProfile {
            name: self.name.ok_or(ValidationError::MissingField(
                "Name is required".to_string(),
            ))?,
            email: self.email.ok_or(ValidationError::MissingField(
                "Email is required".to_string(),
            ))?,
            password_digest: self.password_digest.ok_or(ValidationError::MissingField(
                "Password digest is required".to_string(),
            ))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_id_prefixed() {
        let id = ProfileId::new_random();
        assert!(id.as_str().starts_with("prf_"));
        assert!(id.is_valid());

        let invalid = ProfileId::new("invalid");
        assert!(!invalid.is_valid());
    }

    #[test]
    fn test_new_profile_builder() {
        let profile = NewProfile::builder()
            .name("Ana".to_string())
            .email("a@x.com".to_string())
            .password_digest("digest".to_string())
            .build()
            .unwrap();

        assert_eq!(profile.name, "Ana");
        assert_eq!(profile.email, "a@x.com");
    }

    #[test]
    fn test_new_profile_builder_missing_email() {
        let result = NewProfile::builder()
            .name("Ana".to_string())
            .password_digest("digest".to_string())
            .build();

        assert!(matches!(
            result.unwrap_err(),
            Error::Validation(ValidationError::MissingField(_))
        ));
    }
}
