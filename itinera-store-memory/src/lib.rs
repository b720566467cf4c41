//! In-memory backends for the Itinera account subsystem.
//!
//! These implementations stand in for the hosted identity provider and
//! hosted document store. They reproduce the behavior the lifecycle logic
//! depends on (auto-sign-in after registration, provider-shaped error
//! codes, push-based session notifications, no uniqueness enforcement on the
//! profile store) and carry the failure hooks the lifecycle tests need:
//! refused deletion without a recent sign-in, and a failing sign-out.

mod provider;
mod store;

pub use provider::MemoryCredentialProvider;
pub use store::MemoryProfileStore;
