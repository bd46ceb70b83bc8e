//! UpdateProfileHandler - Command handler for partial profile updates.

use std::sync::Arc;

use super::get_profile::load_profile;
use crate::domain::foundation::{CommandMetadata, DomainError};
use crate::domain::profile::{ProfilePatch, UserProfile};
use crate::ports::ProfileRepository;

/// Command to patch the calling user's profile.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfileCommand {
    pub patch: ProfilePatch,
}

/// Handler for updating profiles.
pub struct UpdateProfileHandler {
    profiles: Arc<dyn ProfileRepository>,
}

impl UpdateProfileHandler {
    pub fn new(profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { profiles }
    }

    pub async fn handle(
        &self,
        cmd: UpdateProfileCommand,
        metadata: CommandMetadata,
    ) -> Result<UserProfile, DomainError> {
        let mut profile = load_profile(self.profiles.as_ref(), &metadata.user_id).await?;

        // Nothing to write.
        if cmd.patch.is_empty() {
            return Ok(profile);
        }

        profile.apply(cmd.patch, metadata.now())?;
        self.profiles.update(&profile).await?;

        tracing::debug!(user_id = %profile.user_id(), "profile updated");

        Ok(profile)
    }
}
