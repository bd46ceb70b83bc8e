//! Request and response bodies for the Google sync endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::calendar::CalendarConnection;
use crate::domain::foundation::Timestamp;

/// POST /api/sync/google/connect
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectRequest {
    /// OAuth authorization code from the consent redirect.
    pub code: String,
}

/// Connection status. Tokens never leave the server.
#[derive(Debug, Clone, Serialize)]
pub struct ConnectionResponse {
    pub provider: &'static str,
    pub scopes: Vec<String>,
    pub connected_at: Timestamp,
    pub expires_at: Timestamp,
    pub last_synced_at: Option<Timestamp>,
}

impl From<&CalendarConnection> for ConnectionResponse {
    fn from(connection: &CalendarConnection) -> Self {
        Self {
            provider: "google",
            scopes: connection.scopes().to_vec(),
            connected_at: *connection.connected_at(),
            expires_at: *connection.expires_at(),
            last_synced_at: connection.last_synced_at().copied(),
        }
    }
}
