//! The profile store interface.
//!
//! The hosted document store holds one profile record per account, keyed
//! logically by email. The store does not enforce uniqueness itself; the
//! signup path does, by looking up before writing.

use crate::{Error, NewProfile, Profile, ProfileId};
use async_trait::async_trait;

/// The hosted document store holding profile records.
#[async_trait]
pub trait ProfileStore: Send + Sync + 'static {
    /// Insert a new profile record. The store assigns the id and creation
    /// timestamp.
    async fn insert(&self, profile: NewProfile) -> Result<Profile, Error>;

    /// Find a profile by email. Absence is a value, not an error: a missing
    /// profile for an existing identity is a tolerated orphan state.
    async fn find_by_email(&self, email: &str) -> Result<Option<Profile>, Error>;

    /// Set the profile's verification mirror to true. This is the only
    /// mutation the store exposes; the mirror is never reset.
    async fn mark_verified(&self, id: &ProfileId) -> Result<(), Error>;

    /// Delete a profile record. Deleting an already-absent record is a no-op.
    async fn delete(&self, id: &ProfileId) -> Result<(), Error>;
}
