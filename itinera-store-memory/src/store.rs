use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use itinera_core::{
    Error, NewProfile, Profile, ProfileId, ProfileStore,
    error::StorageError,
};

/// In-memory profile store.
///
/// Keyed by the store-assigned [`ProfileId`]; email lookups are a linear
/// scan, as on a document store without an index. Uniqueness of the email is
/// not enforced here; the signup path enforces it by looking up first.
pub struct MemoryProfileStore {
    profiles: DashMap<ProfileId, Profile>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self {
            profiles: DashMap::new(),
        }
    }

    pub fn profile_count(&self) -> usize {
        self.profiles.len()
    }
}

impl Default for MemoryProfileStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn insert(&self, profile: NewProfile) -> Result<Profile, Error> {
        let profile = Profile {
            id: ProfileId::new_random(),
            name: profile.name,
            email: profile.email,
            password_digest: profile.password_digest,
            is_verified: false,
            created_at: Utc::now(),
        };

        self.profiles.insert(profile.id.clone(), profile.clone());

        Ok(profile)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Profile>, Error> {
        Ok(self
            .profiles
            .iter()
            .find(|entry| entry.value().email == email)
            .map(|entry| entry.value().clone()))
    }

    async fn mark_verified(&self, id: &ProfileId) -> Result<(), Error> {
        match self.profiles.get_mut(id) {
            Some(mut profile) => {
                profile.is_verified = true;
                Ok(())
            }
            None => Err(StorageError::NotFound.into()),
        }
    }

    async fn delete(&self, id: &ProfileId) -> Result<(), Error> {
        // Deleting an absent record is a no-op, so deletion retries are safe
        self.profiles.remove(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_profile(name: &str, email: &str) -> NewProfile {
        NewProfile::builder()
            .name(name.to_string())
            .email(email.to_string())
            .password_digest("digest".to_string())
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_find_by_email() {
        let store = MemoryProfileStore::new();

        let profile = store.insert(new_profile("Ana", "a@x.com")).await.unwrap();
        assert!(profile.id.is_valid());
        assert!(!profile.is_verified);

        let found = store.find_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(found, profile);

        assert!(store.find_by_email("b@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_mark_verified() {
        let store = MemoryProfileStore::new();
        let profile = store.insert(new_profile("Ana", "a@x.com")).await.unwrap();

        store.mark_verified(&profile.id).await.unwrap();
        let found = store.find_by_email("a@x.com").await.unwrap().unwrap();
        assert!(found.is_verified);

        // Repeating is a no-op
        store.mark_verified(&profile.id).await.unwrap();
        assert!(store.find_by_email("a@x.com").await.unwrap().unwrap().is_verified);

        let missing = ProfileId::new_random();
        assert!(store.mark_verified(&missing).await.is_err());
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = MemoryProfileStore::new();
        let profile = store.insert(new_profile("Ana", "a@x.com")).await.unwrap();

        store.delete(&profile.id).await.unwrap();
        assert!(store.find_by_email("a@x.com").await.unwrap().is_none());

        // Second delete of the same record succeeds
        store.delete(&profile.id).await.unwrap();
        assert_eq!(store.profile_count(), 0);
    }
}
