//! Identity records owned by the credential provider.
//!
//! An [`Identity`] is the provider's view of an account: the email it
//! authenticates, and whether that email has been verified. The credential
//! hash itself never crosses the provider boundary. Identities are created by
//! `register`, mutated only by the provider (the verification flag flips when
//! the user clicks the emailed link), and destroyed by `delete_identity`.

use crate::id::{generate_prefixed_id, validate_prefixed_id};
use serde::{Deserialize, Serialize};

/// A unique, stable identifier for an identity at the credential provider.
/// This value should be treated as opaque.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct IdentityId(String);

impl IdentityId {
    pub fn new(id: &str) -> Self {
        IdentityId(id.to_string())
    }

    pub fn new_random() -> Self {
        IdentityId(generate_prefixed_id("idn"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// Validate that this ID has the correct format for an identity ID.
    pub fn is_valid(&self) -> bool {
        validate_prefixed_id(&self.0, "idn")
    }
}

impl From<&str> for IdentityId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for IdentityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for IdentityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The credential provider's record of an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// The unique identifier assigned by the provider.
    pub id: IdentityId,

    /// The email the identity authenticates.
    pub email: String,

    /// Whether the email has been verified. Owned by the provider; the
    /// application only ever reads it.
    pub email_verified: bool,
}

impl Identity {
    pub fn new(id: IdentityId, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
            email_verified: false,
        }
    }
}

/// The value published by the session observer when someone is logged in:
/// the verified identity plus the display name resolved from the profile
/// store. A profile-less identity is tolerated and shows no name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentIdentity {
    pub identity: Identity,
    pub display_name: Option<String>,
}
