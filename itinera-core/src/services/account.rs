//! Account lifecycle service.
//!
//! Signup, login, logout, and deletion each touch two external systems, the
//! credential provider and the profile store, which share no transaction.
//! Every operation here is an explicit ordered sequence of awaits with a
//! documented preferred-orphan side for each partial failure, and no
//! automatic retries: a failed operation is retried by the user repeating it.

use crate::{
    CurrentIdentity, Error, Identity, NewProfile, Profile,
    error::{AuthError, ProviderError},
    provider::CredentialProvider,
    store::ProfileStore,
    validation::validate_signup,
};
use std::sync::Arc;

/// Orchestrates the credential provider and profile store into
/// atomic-looking signup, login, logout, and delete operations.
pub struct AccountService<C: CredentialProvider, P: ProfileStore> {
    credentials: Arc<C>,
    profiles: Arc<P>,
}

impl<C: CredentialProvider, P: ProfileStore> AccountService<C, P> {
    pub fn new(credentials: Arc<C>, profiles: Arc<P>) -> Self {
        Self {
            credentials,
            profiles,
        }
    }

    /// Register a new account and send the verification email.
    ///
    /// On success the caller should be told to check their inbox; no current
    /// identity is established. The identity is created before the profile:
    /// if the profile write fails, what remains is an identity the user can
    /// still verify and authenticate against, rather than a profile that can
    /// never log in.
    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<Profile, Error> {
        validate_signup(name, email, password, confirm_password)?;

        // Local digest, kept on the profile as a write-only audit field. The
        // provider stores the real credential.
        let digest = hash_password(password);

        let identity = self.credentials.register(email, password).await?;
        self.credentials.send_verification(&identity).await?;

        // Lookup before write: the store does not enforce email uniqueness.
        // A leftover profile from an earlier partial deletion is reused
        // instead of duplicated.
        let profile = match self.profiles.find_by_email(email).await? {
            Some(existing) => {
                tracing::warn!(email = email, "Reusing leftover profile record at signup");
                existing
            }
            None => {
                let new_profile = NewProfile::builder()
                    .name(name.to_string())
                    .email(email.to_string())
                    .password_digest(digest)
                    .build()?;
                self.profiles.insert(new_profile).await?
            }
        };

        // Registration signed the unverified identity in as a side effect.
        // End that session so it is never observed as current.
        self.sign_out_quietly().await;

        Ok(profile)
    }

    /// Authenticate and return the current identity.
    ///
    /// Unverified identities are a hard gate: the fresh session is signed out
    /// and the caller gets [`AuthError::EmailNotVerified`], distinct from
    /// wrong-credential failures. On a verified login the profile's
    /// verification mirror is lazily set; a missing profile is tolerated and
    /// yields a blank display name.
    pub async fn login(&self, email: &str, password: &str) -> Result<CurrentIdentity, Error> {
        let identity = self.credentials.authenticate(email, password).await?;

        if !identity.email_verified {
            self.sign_out_quietly().await;
            return Err(AuthError::EmailNotVerified.into());
        }

        let display_name = match self.profiles.find_by_email(email).await? {
            Some(profile) => {
                // The mirror is only ever set true, and only when it isn't
                // already, so repeated logins are no-ops here.
                if !profile.is_verified {
                    self.profiles.mark_verified(&profile.id).await?;
                }
                Some(profile.name)
            }
            None => {
                tracing::debug!(email = email, "Verified identity has no profile record");
                None
            }
        };

        Ok(CurrentIdentity {
            identity,
            display_name,
        })
    }

    /// End the current session.
    ///
    /// Never fails: the provider clears the local session unconditionally
    /// (see [`CredentialProvider::sign_out`]), so a provider-side failure is
    /// logged and swallowed.
    pub async fn logout(&self) {
        self.sign_out_quietly().await;
    }

    /// Delete the account: profile record first, then the identity.
    ///
    /// This order is the recoverable one. If the identity were deleted first
    /// and the profile step then failed, the caller would have no credential
    /// left to authenticate a retry with. Deleting the profile first means a
    /// failure at the identity step leaves an identity the user can still
    /// sign in with and retry, and the retry skips the already-absent
    /// profile.
    pub async fn delete_account(&self, identity: &Identity) -> Result<(), Error> {
        if let Some(profile) = self.profiles.find_by_email(&identity.email).await? {
            self.profiles.delete(&profile.id).await?;
        }

        match self.credentials.delete_identity(identity).await {
            Ok(()) => Ok(()),
            Err(Error::Provider(ProviderError::RequiresRecentLogin)) => {
                Err(AuthError::ReauthRequired.into())
            }
            Err(e) => Err(e),
        }
    }

    async fn sign_out_quietly(&self) {
        if let Err(e) = self.credentials.sign_out().await {
            tracing::warn!(error = %e, "Provider sign-out failed; local session already cleared");
        }
    }
}

/// Hash a password for the profile's audit field using argon2.
fn hash_password(password: &str) -> String {
    use password_auth::generate_hash;
    generate_hash(password)
}
