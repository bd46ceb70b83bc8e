//! GetProfileHandler - Query handler for the calling user's profile.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::profile::UserProfile;
use crate::ports::ProfileRepository;

/// Handler for reading profiles.
pub struct GetProfileHandler {
    profiles: Arc<dyn ProfileRepository>,
}

impl GetProfileHandler {
    pub fn new(profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { profiles }
    }

    pub async fn handle(&self, user_id: &UserId) -> Result<UserProfile, DomainError> {
        load_profile(self.profiles.as_ref(), user_id).await
    }
}

/// Loads a profile, mapping absence to `ProfileNotFound`.
pub(crate) async fn load_profile(
    profiles: &dyn ProfileRepository,
    user_id: &UserId,
) -> Result<UserProfile, DomainError> {
    profiles
        .find_by_user(user_id)
        .await?
        .ok_or_else(|| DomainError::new(ErrorCode::ProfileNotFound, "Profile not found"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryProfileRepository;
    use crate::application::test_support::{profile, user};

    #[tokio::test]
    async fn returns_existing_profile() {
        let repo = InMemoryProfileRepository::new();
        repo.create(&profile()).await.unwrap();

        let found = GetProfileHandler::new(Arc::new(repo)).handle(&user()).await.unwrap();

        assert_eq!(found.display_name(), "Ada");
    }

    #[tokio::test]
    async fn missing_profile_is_not_found() {
        let handler = GetProfileHandler::new(Arc::new(InMemoryProfileRepository::new()));

        let err = handler.handle(&user()).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::ProfileNotFound);
    }
}
