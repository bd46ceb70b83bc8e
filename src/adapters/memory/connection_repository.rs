//! In-memory `ConnectionRepository`.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::calendar::CalendarConnection;
use crate::domain::foundation::{DomainError, UserId};
use crate::ports::ConnectionRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryConnectionRepository {
    connections: Arc<RwLock<HashMap<UserId, CalendarConnection>>>,
}

impl InMemoryConnectionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConnectionRepository for InMemoryConnectionRepository {
    async fn upsert(&self, connection: &CalendarConnection) -> Result<(), DomainError> {
        self.connections
            .write()
            .await
            .insert(connection.user_id().clone(), connection.clone());
        Ok(())
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<CalendarConnection>, DomainError> {
        Ok(self.connections.read().await.get(user_id).cloned())
    }

    async fn delete(&self, user_id: &UserId) -> Result<bool, DomainError> {
        Ok(self.connections.write().await.remove(user_id).is_some())
    }
}
