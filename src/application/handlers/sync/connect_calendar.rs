//! ConnectCalendarHandler - Exchanges an OAuth code and stores the tokens.

use std::sync::Arc;

use crate::domain::calendar::CalendarConnection;
use crate::domain::foundation::{CommandMetadata, DomainError};
use crate::ports::{CalendarProvider, ConnectionRepository, SecretCipher};

/// Command carrying the authorization code from the OAuth redirect.
#[derive(Debug, Clone)]
pub struct ConnectCalendarCommand {
    pub code: String,
}

/// Handler for connecting a Google account.
pub struct ConnectCalendarHandler {
    provider: Arc<dyn CalendarProvider>,
    connections: Arc<dyn ConnectionRepository>,
    cipher: Arc<dyn SecretCipher>,
}

impl ConnectCalendarHandler {
    pub fn new(
        provider: Arc<dyn CalendarProvider>,
        connections: Arc<dyn ConnectionRepository>,
        cipher: Arc<dyn SecretCipher>,
    ) -> Self {
        Self {
            provider,
            connections,
            cipher,
        }
    }

    pub async fn handle(
        &self,
        cmd: ConnectCalendarCommand,
        metadata: CommandMetadata,
    ) -> Result<CalendarConnection, DomainError> {
        let code = cmd.code.trim();
        if code.is_empty() {
            return Err(DomainError::validation("code", "Authorization code is required"));
        }

        let now = metadata.now();
        let tokens = self.provider.exchange_code(code).await?;

        let access_token = self.cipher.encrypt(&tokens.access_token)?;
        let refresh_token = tokens
            .refresh_token
            .as_ref()
            .map(|t| self.cipher.encrypt(t))
            .transpose()?;

        let mut connection = CalendarConnection::new(
            metadata.user_id.clone(),
            access_token,
            refresh_token,
            now.plus_secs(tokens.expires_in_secs),
            tokens.scopes,
            now,
        );

        // Google only returns a refresh token on the first consent.
        if let Some(previous) = self.connections.find_by_user(&metadata.user_id).await? {
            connection.inherit_refresh_token(&previous);
        }

        self.connections.upsert(&connection).await?;

        tracing::info!(
            user_id = %metadata.user_id,
            has_refresh_token = connection.refresh_token().is_some(),
            "calendar connected"
        );

        Ok(connection)
    }
}
