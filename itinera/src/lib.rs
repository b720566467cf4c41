//! # Itinera
//!
//! Account lifecycle for the Itinera travel planner. The credential lives at
//! a hosted identity provider and the profile record in a hosted document
//! store; this crate coordinates the two so that signup, login, logout, and
//! account deletion look atomic to the caller even though the stores share no
//! transaction.
//!
//! What you get:
//! - Registration with email verification, and a login gate on the verified
//!   flag
//! - A five-rule password policy with a per-keystroke strength breakdown
//! - Account deletion with a re-authentication fallback that is safe to retry
//! - A single subscribable current-identity value, driven by provider push
//!   notifications
//!
//! ## Example
//!
//! ```rust,no_run
//! use itinera::{Itinera, MemoryCredentialProvider, MemoryProfileStore};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let credentials = Arc::new(MemoryCredentialProvider::new());
//!     let profiles = Arc::new(MemoryProfileStore::new());
//!
//!     let app = Itinera::new(credentials, profiles);
//!
//!     // The user is told to check their inbox; nobody is logged in yet
//!     app.signup("Ana", "ana@example.com", "Abcdef1!", "Abcdef1!").await?;
//!
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

use tokio::sync::watch;

/// Re-export core types commonly used with the Itinera API.
pub use itinera_core::{
    AccountService, AuthError, CredentialProvider, CurrentIdentity, Error, Identity, IdentityId,
    NewProfile, PasswordStrength, Profile, ProfileId, ProfileStore, ProviderError,
    SessionObserver, StorageError, ValidationError, check_password,
};

/// Re-export the in-memory backends.
#[cfg(feature = "memory")]
pub use itinera_store_memory::{MemoryCredentialProvider, MemoryProfileStore};

/// The account coordinator exposed to the UI layer.
///
/// Owns the [`AccountService`] and the [`SessionObserver`] over an injected
/// credential provider and profile store. The observer starts with
/// construction and is released when the `Itinera` value is dropped.
pub struct Itinera<C: CredentialProvider, P: ProfileStore> {
    accounts: AccountService<C, P>,
    observer: SessionObserver,
}

impl<C: CredentialProvider, P: ProfileStore> Itinera<C, P> {
    pub fn new(credentials: Arc<C>, profiles: Arc<P>) -> Self {
        let observer = SessionObserver::spawn(credentials.clone(), profiles.clone());
        let accounts = AccountService::new(credentials, profiles);
        Self { accounts, observer }
    }

    /// Register a new account; the caller should check their inbox for the
    /// verification email. No current identity is established.
    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<Profile, Error> {
        self.accounts
            .signup(name, email, password, confirm_password)
            .await
    }

    /// Authenticate. Fails with [`AuthError::EmailNotVerified`] until the
    /// verification link has been clicked.
    pub async fn login(&self, email: &str, password: &str) -> Result<CurrentIdentity, Error> {
        self.accounts.login(email, password).await
    }

    /// End the current session. Never fails; provider-side errors are logged.
    pub async fn logout(&self) {
        self.accounts.logout().await;
    }

    /// Delete the account. On [`AuthError::ReauthRequired`], log in again and
    /// retry; the retry is safe against the partially completed first
    /// attempt.
    pub async fn delete_account(&self, identity: &Identity) -> Result<(), Error> {
        self.accounts.delete_account(identity).await
    }

    /// The current identity, or `None` when nobody is logged in. This value
    /// is the application-wide source of truth for login state.
    pub fn current_identity(&self) -> Option<CurrentIdentity> {
        self.observer.current()
    }

    /// Subscribe to current-identity changes.
    pub fn watch_identity(&self) -> watch::Receiver<Option<CurrentIdentity>> {
        self.observer.watch()
    }

    /// Direct access to the underlying account service.
    pub fn accounts(&self) -> &AccountService<C, P> {
        &self.accounts
    }
}
