//! ConnectionRepository port for stored calendar connections.
//!
//! Tokens arrive here already encrypted; the repository never sees
//! plaintext credentials.

use async_trait::async_trait;

use crate::domain::calendar::CalendarConnection;
use crate::domain::foundation::{DomainError, UserId};

#[async_trait]
pub trait ConnectionRepository: Send + Sync {
    /// Insert or replace the user's connection.
    async fn upsert(&self, connection: &CalendarConnection) -> Result<(), DomainError>;

    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<CalendarConnection>, DomainError>;

    /// Remove the connection. Returns false when there was none.
    async fn delete(&self, user_id: &UserId) -> Result<bool, DomainError>;
}
