//! CreateProfileHandler - Command handler for creating a user's profile.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, DomainError, ErrorCode};
use crate::domain::profile::{ProfilePatch, UserProfile};
use crate::ports::ProfileRepository;

/// Command to create the calling user's profile.
#[derive(Debug, Clone, Default)]
pub struct CreateProfileCommand {
    pub display_name: String,
    /// Preferences that differ from the defaults.
    pub settings: ProfilePatch,
}

/// Handler for creating profiles.
pub struct CreateProfileHandler {
    profiles: Arc<dyn ProfileRepository>,
}

impl CreateProfileHandler {
    pub fn new(profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { profiles }
    }

    pub async fn handle(
        &self,
        cmd: CreateProfileCommand,
        metadata: CommandMetadata,
    ) -> Result<UserProfile, DomainError> {
        let user_id = metadata.user_id.clone();

        if self.profiles.exists_for_user(&user_id).await? {
            return Err(DomainError::new(
                ErrorCode::ProfileAlreadyExists,
                "A profile already exists for this user",
            ));
        }

        let now = metadata.now();
        let mut profile = UserProfile::new(user_id, &cmd.display_name, now)?;
        if !cmd.settings.is_empty() {
            profile.apply(cmd.settings, now)?;
        }

        self.profiles.create(&profile).await?;

        tracing::info!(
            user_id = %profile.user_id(),
            correlation_id = %metadata.correlation_id(),
            "profile created"
        );

        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryProfileRepository;
    use crate::application::test_support::{at, metadata_at, monday};
    use crate::domain::profile::CoachingTone;

    fn handler(repo: &InMemoryProfileRepository) -> CreateProfileHandler {
        CreateProfileHandler::new(Arc::new(repo.clone()))
    }

    #[tokio::test]
    async fn creates_profile_with_defaults() {
        let repo = InMemoryProfileRepository::new();

        let profile = handler(&repo)
            .handle(
                CreateProfileCommand {
                    display_name: "  Ada  ".to_string(),
                    ..Default::default()
                },
                metadata_at(at(monday(), 8, 0)),
            )
            .await
            .unwrap();

        assert_eq!(profile.display_name(), "Ada");
        assert_eq!(profile.focus_block_minutes(), 90);
        assert!(repo.find_by_user(profile.user_id()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn applies_initial_settings() {
        let repo = InMemoryProfileRepository::new();

        let profile = handler(&repo)
            .handle(
                CreateProfileCommand {
                    display_name: "Ada".to_string(),
                    settings: ProfilePatch {
                        utc_offset_minutes: Some(120),
                        coaching_tone: Some(CoachingTone::Direct),
                        ..Default::default()
                    },
                },
                metadata_at(at(monday(), 8, 0)),
            )
            .await
            .unwrap();

        assert_eq!(profile.utc_offset().minutes(), 120);
        assert_eq!(profile.coaching_tone(), CoachingTone::Direct);
    }

    #[tokio::test]
    async fn rejects_second_profile() {
        let repo = InMemoryProfileRepository::new();
        let cmd = CreateProfileCommand {
            display_name: "Ada".to_string(),
            ..Default::default()
        };
        handler(&repo)
            .handle(cmd.clone(), metadata_at(at(monday(), 8, 0)))
            .await
            .unwrap();

        let err = handler(&repo)
            .handle(cmd, metadata_at(at(monday(), 9, 0)))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ProfileAlreadyExists);
    }

    #[tokio::test]
    async fn rejects_invalid_settings_without_saving() {
        let repo = InMemoryProfileRepository::new();

        let err = handler(&repo)
            .handle(
                CreateProfileCommand {
                    display_name: "Ada".to_string(),
                    settings: ProfilePatch {
                        focus_block_minutes: Some(5),
                        ..Default::default()
                    },
                },
                metadata_at(at(monday(), 8, 0)),
            )
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationFailed);
        let user = crate::application::test_support::user();
        assert!(!repo.exists_for_user(&user).await.unwrap());
    }
}
