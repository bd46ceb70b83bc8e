//! DisconnectCalendarHandler - Forgets the stored Google connection.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, DomainError, ErrorCode};
use crate::ports::ConnectionRepository;

pub struct DisconnectCalendarHandler {
    connections: Arc<dyn ConnectionRepository>,
}

impl DisconnectCalendarHandler {
    pub fn new(connections: Arc<dyn ConnectionRepository>) -> Self {
        Self { connections }
    }

    pub async fn handle(&self, metadata: CommandMetadata) -> Result<(), DomainError> {
        if !self.connections.delete(&metadata.user_id).await? {
            return Err(DomainError::new(
                ErrorCode::ConnectionNotFound,
                "No calendar connection to remove",
            ));
        }

        tracing::info!(user_id = %metadata.user_id, "calendar disconnected");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryConnectionRepository;
    use crate::application::test_support::{at, metadata_at, monday, user};
    use crate::domain::calendar::{CalendarConnection, EncryptedSecret};

    #[tokio::test]
    async fn removes_connection_once() {
        let connections = InMemoryConnectionRepository::new();
        connections
            .upsert(&CalendarConnection::new(
                user(),
                EncryptedSecret::new("sealed"),
                None,
                at(monday(), 9, 0),
                vec![],
                at(monday(), 8, 0),
            ))
            .await
            .unwrap();
        let handler = DisconnectCalendarHandler::new(Arc::new(connections.clone()));

        handler.handle(metadata_at(at(monday(), 10, 0))).await.unwrap();
        let err = handler.handle(metadata_at(at(monday(), 10, 5))).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::ConnectionNotFound);
        assert!(connections.find_by_user(&user()).await.unwrap().is_none());
    }
}
