//! Core functionality for the Itinera account subsystem.
//!
//! Itinera delegates credential storage to a hosted identity provider and
//! profile storage to a hosted document store. This crate owns the logic that
//! sits between the two: the account lifecycle (signup, login, logout,
//! deletion), the password policy applied at signup, and the session observer
//! that turns provider push notifications into a single current-identity
//! value.
//!
//! The two external collaborators are abstracted behind [`CredentialProvider`]
//! and [`ProfileStore`]. They have independent failure domains and no shared
//! transaction, so each lifecycle operation defines an explicit step ordering
//! and a preferred orphan side; see [`AccountService`] for the details.

pub mod error;
pub mod id;
pub mod identity;
pub mod policy;
pub mod profile;
pub mod provider;
pub mod services;
pub mod store;
pub mod validation;

pub use error::{AuthError, Error, ProviderError, StorageError, ValidationError};
pub use identity::{CurrentIdentity, Identity, IdentityId};
pub use policy::{PasswordStrength, check_password};
pub use profile::{NewProfile, Profile, ProfileId};
pub use provider::CredentialProvider;
pub use services::{AccountService, SessionObserver};
pub use store::ProfileStore;
