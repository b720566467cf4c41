//! The credential provider interface.
//!
//! The hosted identity provider is the authoritative home of the email +
//! password credential and of the email-verified flag. This crate treats it
//! as an opaque service behind [`CredentialProvider`]; the concrete backend
//! lives in a separate crate (see `itinera-store-memory` for the in-memory
//! one).

use crate::{Error, Identity};
use async_trait::async_trait;
use tokio::sync::watch;

/// The hosted identity provider.
///
/// All methods are asynchronous network operations with provider-defined
/// failure modes, surfaced as [`crate::ProviderError`]. Session state is
/// pushed through the [`sessions`](CredentialProvider::sessions) watch
/// channel rather than polled.
#[async_trait]
pub trait CredentialProvider: Send + Sync + 'static {
    /// Create a new identity for this email and password, and sign it in.
    ///
    /// Hosted providers establish a session for the newly created identity as
    /// a side effect; callers that do not want the unverified session live
    /// must follow up with [`sign_out`](CredentialProvider::sign_out).
    async fn register(&self, email: &str, password: &str) -> Result<Identity, Error>;

    /// Authenticate with an email and password, establishing a session.
    async fn authenticate(&self, email: &str, password: &str) -> Result<Identity, Error>;

    /// Send a verification email for the given identity.
    async fn send_verification(&self, identity: &Identity) -> Result<(), Error>;

    /// End the current session.
    ///
    /// Implementations must clear the local session and notify session
    /// watchers unconditionally, even when the provider-side call fails. The
    /// returned error then reports the provider failure only; locally, nobody
    /// is signed in anymore.
    async fn sign_out(&self) -> Result<(), Error>;

    /// Permanently delete an identity at the provider.
    ///
    /// Providers may refuse with
    /// [`crate::ProviderError::RequiresRecentLogin`] when the session is too
    /// old for a destructive operation.
    async fn delete_identity(&self, identity: &Identity) -> Result<(), Error>;

    /// Subscribe to session-change notifications.
    ///
    /// The channel always holds the identity of the currently signed-in
    /// session, or `None`. Dropping the receiver is the unsubscription; no
    /// notification is delivered after that.
    fn sessions(&self) -> watch::Receiver<Option<Identity>>;
}
