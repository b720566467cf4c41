//! Session observer.
//!
//! One task subscribes to the credential provider's session channel and owns
//! the process-wide current-identity value. Every other component reads it
//! through [`SessionObserver::current`] or [`SessionObserver::watch`]; none
//! may cache or independently decide login state.
//!
//! An unverified session is never published. Verification is checked at the
//! moment of observation, against the identity, not against the profile's
//! informational mirror.

use crate::{CurrentIdentity, Identity, provider::CredentialProvider, store::ProfileStore};
use std::sync::Arc;
use tokio::{sync::watch, task::JoinHandle};

/// Resolves provider session notifications into the single current-identity
/// value.
pub struct SessionObserver {
    current: watch::Receiver<Option<CurrentIdentity>>,
    task: JoinHandle<()>,
}

impl SessionObserver {
    /// Subscribe to the provider's session channel and start resolving.
    ///
    /// Each notification carrying a verified identity triggers one profile
    /// lookup by email; the resolved `(identity, display name)` pair is
    /// published. Anything else (no session, or an unverified one)
    /// publishes `None`.
    pub fn spawn<C, P>(credentials: Arc<C>, profiles: Arc<P>) -> Self
    where
        C: CredentialProvider,
        P: ProfileStore,
    {
        let (tx, rx) = watch::channel(None);
        let mut sessions = credentials.sessions();

        let task = tokio::spawn(async move {
            loop {
                let session = sessions.borrow_and_update().clone();
                let next = resolve(session, profiles.as_ref()).await;
                tx.send_replace(next);

                if sessions.changed().await.is_err() {
                    tracing::debug!("Session channel closed, shutting down session observer");
                    tx.send_replace(None);
                    break;
                }
            }
        });

        Self { current: rx, task }
    }

    /// The current identity, or `None` when nobody is logged in.
    pub fn current(&self) -> Option<CurrentIdentity> {
        self.current.borrow().clone()
    }

    /// Subscribe to current-identity changes.
    pub fn watch(&self) -> watch::Receiver<Option<CurrentIdentity>> {
        self.current.clone()
    }

    /// Release the subscription. No further notifications are delivered.
    pub fn shutdown(self) {
        self.task.abort();
    }
}

impl Drop for SessionObserver {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn resolve<P: ProfileStore>(
    session: Option<Identity>,
    profiles: &P,
) -> Option<CurrentIdentity> {
    let identity = session?;

    if !identity.email_verified {
        return None;
    }

    let display_name = match profiles.find_by_email(&identity.email).await {
        Ok(Some(profile)) => Some(profile.name),
        // Profile-less identity: tolerated orphan, shows no name
        Ok(None) => None,
        Err(e) => {
            tracing::warn!(error = %e, "Profile lookup failed while resolving session");
            None
        }
    };

    Some(CurrentIdentity {
        identity,
        display_name,
    })
}
