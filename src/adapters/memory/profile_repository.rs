//! In-memory `ProfileRepository`.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::profile::UserProfile;
use crate::ports::ProfileRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileRepository {
    profiles: Arc<RwLock<HashMap<UserId, UserProfile>>>,
}

impl InMemoryProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn create(&self, profile: &UserProfile) -> Result<(), DomainError> {
        let mut profiles = self.profiles.write().await;
        if profiles.contains_key(profile.user_id()) {
            return Err(DomainError::new(
                ErrorCode::ProfileAlreadyExists,
                "Profile already exists",
            ));
        }
        profiles.insert(profile.user_id().clone(), profile.clone());
        Ok(())
    }

    async fn update(&self, profile: &UserProfile) -> Result<(), DomainError> {
        let mut profiles = self.profiles.write().await;
        match profiles.get_mut(profile.user_id()) {
            Some(stored) => {
                *stored = profile.clone();
                Ok(())
            }
            None => Err(DomainError::new(ErrorCode::ProfileNotFound, "Profile not found")),
        }
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<UserProfile>, DomainError> {
        Ok(self.profiles.read().await.get(user_id).cloned())
    }

    async fn exists_for_user(&self, user_id: &UserId) -> Result<bool, DomainError> {
        Ok(self.profiles.read().await.contains_key(user_id))
    }

    async fn delete(&self, user_id: &UserId) -> Result<bool, DomainError> {
        Ok(self.profiles.write().await.remove(user_id).is_some())
    }
}
