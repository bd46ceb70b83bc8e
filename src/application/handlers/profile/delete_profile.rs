//! DeleteProfileHandler - Removes a profile and its calendar connection.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, DomainError, ErrorCode};
use crate::ports::{ConnectionRepository, ProfileRepository};

/// Handler for deleting profiles.
pub struct DeleteProfileHandler {
    profiles: Arc<dyn ProfileRepository>,
    connections: Arc<dyn ConnectionRepository>,
}

impl DeleteProfileHandler {
    pub fn new(
        profiles: Arc<dyn ProfileRepository>,
        connections: Arc<dyn ConnectionRepository>,
    ) -> Self {
        Self {
            profiles,
            connections,
        }
    }

    pub async fn handle(&self, metadata: CommandMetadata) -> Result<(), DomainError> {
        let user_id = &metadata.user_id;

        if !self.profiles.delete(user_id).await? {
            return Err(DomainError::new(ErrorCode::ProfileNotFound, "Profile not found"));
        }
        let disconnected = self.connections.delete(user_id).await?;

        tracing::info!(user_id = %user_id, disconnected, "profile deleted");

        Ok(())
    }
}
