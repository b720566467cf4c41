use async_trait::async_trait;
use dashmap::DashMap;
use itinera_core::{
    CredentialProvider, Error, Identity, IdentityId,
    error::ProviderError,
};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::watch;

/// The provider rejects passwords below its own floor, independently of the
/// application's stricter signup policy.
const PROVIDER_MIN_PASSWORD_LEN: usize = 6;

struct StoredIdentity {
    identity: Identity,
    password: String,
}

/// In-memory identity provider.
///
/// Holds the authoritative email + password credential per identity, tracks
/// the verification flag, and pushes session changes through a watch channel.
/// Registration signs the new identity in, as hosted providers do.
pub struct MemoryCredentialProvider {
    identities: DashMap<String, StoredIdentity>,
    session: watch::Sender<Option<Identity>>,
    verification_outbox: Mutex<Vec<String>>,
    requires_recent_login: AtomicBool,
    fail_next_sign_out: AtomicBool,
}

impl MemoryCredentialProvider {
    pub fn new() -> Self {
        let (session, _) = watch::channel(None);
        Self {
            identities: DashMap::new(),
            session,
            verification_outbox: Mutex::new(Vec::new()),
            requires_recent_login: AtomicBool::new(false),
            fail_next_sign_out: AtomicBool::new(false),
        }
    }

    /// Simulate the user clicking the verification link that was emailed to
    /// them. Returns false if no identity exists for the email.
    ///
    /// The flag only becomes visible to the application on the next
    /// `authenticate`; an already-live session keeps its stale snapshot,
    /// just as a hosted provider's token does until refreshed.
    pub fn complete_verification(&self, email: &str) -> bool {
        match self.identities.get_mut(email) {
            Some(mut stored) => {
                stored.identity.email_verified = true;
                true
            }
            None => false,
        }
    }

    /// Emails a verification mail has been "sent" to, in order.
    pub fn verification_outbox(&self) -> Vec<String> {
        self.verification_outbox.lock().unwrap().clone()
    }

    /// When set, `delete_identity` refuses with `RequiresRecentLogin`.
    pub fn set_requires_recent_login(&self, value: bool) {
        self.requires_recent_login.store(value, Ordering::SeqCst);
    }

    /// Make the next `sign_out` report a provider-side failure. The local
    /// session still clears.
    pub fn fail_next_sign_out(&self) {
        self.fail_next_sign_out.store(true, Ordering::SeqCst);
    }

    pub fn identity_count(&self) -> usize {
        self.identities.len()
    }
}

impl Default for MemoryCredentialProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialProvider for MemoryCredentialProvider {
    async fn register(&self, email: &str, password: &str) -> Result<Identity, Error> {
        if !email.contains('@') || email.starts_with('@') || email.ends_with('@') {
            return Err(ProviderError::InvalidEmail.into());
        }
        if password.len() < PROVIDER_MIN_PASSWORD_LEN {
            return Err(ProviderError::WeakPassword.into());
        }
        if self.identities.contains_key(email) {
            return Err(ProviderError::EmailAlreadyInUse.into());
        }

        let identity = Identity::new(IdentityId::new_random(), email);
        self.identities.insert(
            email.to_string(),
            StoredIdentity {
                identity: identity.clone(),
                password: password.to_string(),
            },
        );

        tracing::debug!(email = email, "Registered new identity");

        // Hosted providers establish a session for the fresh identity
        self.session.send_replace(Some(identity.clone()));

        Ok(identity)
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<Identity, Error> {
        let stored = self
            .identities
            .get(email)
            .ok_or(Error::Provider(ProviderError::UserNotFound))?;

        if stored.password != password {
            return Err(ProviderError::WrongPassword.into());
        }

        let identity = stored.identity.clone();
        drop(stored);

        self.session.send_replace(Some(identity.clone()));

        Ok(identity)
    }

    async fn send_verification(&self, identity: &Identity) -> Result<(), Error> {
        if !self.identities.contains_key(&identity.email) {
            return Err(ProviderError::UserNotFound.into());
        }

        self.verification_outbox
            .lock()
            .unwrap()
            .push(identity.email.clone());

        Ok(())
    }

    async fn sign_out(&self) -> Result<(), Error> {
        // The local session clears no matter what the provider call does
        self.session.send_replace(None);

        if self.fail_next_sign_out.swap(false, Ordering::SeqCst) {
            return Err(ProviderError::Unavailable("sign-out failed".to_string()).into());
        }

        Ok(())
    }

    async fn delete_identity(&self, identity: &Identity) -> Result<(), Error> {
        if self.requires_recent_login.load(Ordering::SeqCst) {
            return Err(ProviderError::RequiresRecentLogin.into());
        }

        if self.identities.remove(&identity.email).is_none() {
            return Err(ProviderError::UserNotFound.into());
        }

        self.session.send_replace(None);

        Ok(())
    }

    fn sessions(&self) -> watch::Receiver<Option<Identity>> {
        self.session.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_register_signs_in_unverified() {
        let provider = MemoryCredentialProvider::new();

        let identity = provider.register("a@x.com", "Abcdef1!").await.unwrap();
        assert!(!identity.email_verified);

        let session = provider.sessions().borrow().clone();
        assert_eq!(session.unwrap().email, "a@x.com");
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_email() {
        let provider = MemoryCredentialProvider::new();
        provider.register("a@x.com", "Abcdef1!").await.unwrap();

        let result = provider.register("a@x.com", "Other999!").await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Provider(ProviderError::EmailAlreadyInUse)
        ));
        assert_eq!(provider.identity_count(), 1);
    }

    #[tokio::test]
    async fn test_register_provider_side_rejections() {
        let provider = MemoryCredentialProvider::new();

        let result = provider.register("not-an-email", "Abcdef1!").await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Provider(ProviderError::InvalidEmail)
        ));

        // Below the provider's own floor, regardless of the app policy
        let result = provider.register("a@x.com", "Ab1!").await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Provider(ProviderError::WeakPassword)
        ));
    }

    #[tokio::test]
    async fn test_authenticate_errors() {
        let provider = MemoryCredentialProvider::new();
        provider.register("a@x.com", "Abcdef1!").await.unwrap();

        let result = provider.authenticate("a@x.com", "Wrong999!").await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Provider(ProviderError::WrongPassword)
        ));

        let result = provider.authenticate("nobody@x.com", "Abcdef1!").await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Provider(ProviderError::UserNotFound)
        ));
    }

    #[tokio::test]
    async fn test_verification_flag_visible_on_next_authenticate() {
        let provider = MemoryCredentialProvider::new();
        provider.register("a@x.com", "Abcdef1!").await.unwrap();

        assert!(provider.complete_verification("a@x.com"));
        assert!(!provider.complete_verification("nobody@x.com"));

        let identity = provider.authenticate("a@x.com", "Abcdef1!").await.unwrap();
        assert!(identity.email_verified);
    }

    #[tokio::test]
    async fn test_send_verification_records_outbox() {
        let provider = MemoryCredentialProvider::new();
        let identity = provider.register("a@x.com", "Abcdef1!").await.unwrap();

        provider.send_verification(&identity).await.unwrap();
        assert_eq!(provider.verification_outbox(), vec!["a@x.com".to_string()]);
    }

    #[tokio::test]
    async fn test_sign_out_clears_locally_even_on_failure() {
        let provider = MemoryCredentialProvider::new();
        provider.register("a@x.com", "Abcdef1!").await.unwrap();
        assert!(provider.sessions().borrow().is_some());

        provider.fail_next_sign_out();
        let result = provider.sign_out().await;

        assert!(result.is_err());
        assert!(provider.sessions().borrow().is_none());

        // The failure was one-shot
        provider.register("b@x.com", "Abcdef1!").await.unwrap();
        assert!(provider.sign_out().await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_identity_respects_recent_login_requirement() {
        let provider = MemoryCredentialProvider::new();
        let identity = provider.register("a@x.com", "Abcdef1!").await.unwrap();

        provider.set_requires_recent_login(true);
        let result = provider.delete_identity(&identity).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Provider(ProviderError::RequiresRecentLogin)
        ));
        assert_eq!(provider.identity_count(), 1);

        provider.set_requires_recent_login(false);
        provider.delete_identity(&identity).await.unwrap();
        assert_eq!(provider.identity_count(), 0);
        assert!(provider.sessions().borrow().is_none());
    }
}
