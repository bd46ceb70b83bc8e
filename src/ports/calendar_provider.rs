//! Calendar Provider Port - external calendar and task list access.
//!
//! Covers the OAuth code exchange, access token refresh, and read-only
//! listing of events and tasks. Implementations translate provider payloads
//! into `CalendarEvent` and `ExternalTask`.

use async_trait::async_trait;
use secrecy::Secret;
use thiserror::Error;

use crate::domain::calendar::{CalendarEvent, ExternalTask};
use crate::domain::foundation::{DomainError, ErrorCode, TimeSpan};

#[async_trait]
pub trait CalendarProvider: Send + Sync {
    /// Exchange an authorization code for tokens.
    async fn exchange_code(&self, code: &str) -> Result<OAuthTokens, CalendarError>;

    /// Obtain a fresh access token. The response may omit the refresh token.
    async fn refresh(&self, refresh_token: &Secret<String>) -> Result<OAuthTokens, CalendarError>;

    /// Events overlapping `span` on the user's primary calendar.
    async fn list_events(
        &self,
        access_token: &Secret<String>,
        span: TimeSpan,
    ) -> Result<Vec<CalendarEvent>, CalendarError>;

    /// Open tasks across the user's task lists.
    async fn list_tasks(&self, access_token: &Secret<String>) -> Result<Vec<ExternalTask>, CalendarError>;
}

/// Tokens returned by the provider's token endpoint.
#[derive(Debug)]
pub struct OAuthTokens {
    pub access_token: Secret<String>,
    pub refresh_token: Option<Secret<String>>,
    /// Lifetime of the access token in seconds.
    pub expires_in_secs: i64,
    pub scopes: Vec<String>,
}

/// Calendar provider errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    /// Authorization code or refresh token was rejected.
    #[error("grant rejected: {0}")]
    InvalidGrant(String),

    /// Access token rejected by the API.
    #[error("access token rejected")]
    Unauthorized,

    #[error("rate limited by calendar provider")]
    RateLimited,

    #[error("calendar provider unavailable: {0}")]
    Unavailable(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("unexpected provider response: {0}")]
    Parse(String),
}

impl CalendarError {
    /// True when the user has to connect the calendar again.
    pub fn requires_reconnect(&self) -> bool {
        matches!(self, CalendarError::InvalidGrant(_) | CalendarError::Unauthorized)
    }
}

impl From<CalendarError> for DomainError {
    fn from(err: CalendarError) -> Self {
        DomainError::new(ErrorCode::CalendarProviderError, err.to_string())
            .with_detail("reconnect_required", err.requires_reconnect().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_grants_require_reconnect() {
        assert!(CalendarError::InvalidGrant("expired".into()).requires_reconnect());
        assert!(CalendarError::Unauthorized.requires_reconnect());
        assert!(!CalendarError::RateLimited.requires_reconnect());
        assert!(!CalendarError::Network("reset".into()).requires_reconnect());
    }

    #[test]
    fn maps_to_calendar_provider_error() {
        let err: DomainError = CalendarError::Unavailable("503".into()).into();
        assert_eq!(err.code, ErrorCode::CalendarProviderError);
        assert!(err.message.contains("503"));
    }
}
