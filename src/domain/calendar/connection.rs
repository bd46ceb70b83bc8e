//! Stored link between a user and their calendar account.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{Timestamp, UserId};

/// Access tokens expiring within this many seconds are refreshed before use.
pub const REFRESH_LEEWAY_SECS: i64 = 60;

/// Ciphertext of an OAuth token, base64 encoded. Never holds plaintext.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncryptedSecret(String);

impl EncryptedSecret {
    pub fn new(ciphertext: impl Into<String>) -> Self {
        Self(ciphertext.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for EncryptedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EncryptedSecret(..)")
    }
}

/// A user's calendar authorization with both tokens encrypted at rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarConnection {
    user_id: UserId,
    access_token: EncryptedSecret,
    refresh_token: Option<EncryptedSecret>,
    expires_at: Timestamp,
    scopes: Vec<String>,
    connected_at: Timestamp,
    last_synced_at: Option<Timestamp>,
}

impl CalendarConnection {
    pub fn new(
        user_id: UserId,
        access_token: EncryptedSecret,
        refresh_token: Option<EncryptedSecret>,
        expires_at: Timestamp,
        scopes: Vec<String>,
        connected_at: Timestamp,
    ) -> Self {
        Self {
            user_id,
            access_token,
            refresh_token,
            expires_at,
            scopes,
            connected_at,
            last_synced_at: None,
        }
    }

    /// Reconstitute a connection from persistence.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        user_id: UserId,
        access_token: EncryptedSecret,
        refresh_token: Option<EncryptedSecret>,
        expires_at: Timestamp,
        scopes: Vec<String>,
        connected_at: Timestamp,
        last_synced_at: Option<Timestamp>,
    ) -> Self {
        Self {
            user_id,
            access_token,
            refresh_token,
            expires_at,
            scopes,
            connected_at,
            last_synced_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn access_token(&self) -> &EncryptedSecret {
        &self.access_token
    }

    pub fn refresh_token(&self) -> Option<&EncryptedSecret> {
        self.refresh_token.as_ref()
    }

    pub fn expires_at(&self) -> &Timestamp {
        &self.expires_at
    }

    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }

    pub fn connected_at(&self) -> &Timestamp {
        &self.connected_at
    }

    pub fn last_synced_at(&self) -> Option<&Timestamp> {
        self.last_synced_at.as_ref()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Behavior
    // ─────────────────────────────────────────────────────────────────────────

    /// True when the access token is expired or expires within the leeway.
    pub fn needs_refresh(&self, now: &Timestamp) -> bool {
        self.expires_at.duration_since(now).num_seconds() <= REFRESH_LEEWAY_SECS
    }

    /// Keeps a previously stored refresh token when a reconnect did not
    /// return a new one.
    pub fn inherit_refresh_token(&mut self, previous: &CalendarConnection) {
        if self.refresh_token.is_none() {
            self.refresh_token = previous.refresh_token.clone();
        }
    }

    pub fn rotate_access_token(&mut self, access_token: EncryptedSecret, expires_at: Timestamp) {
        self.access_token = access_token;
        self.expires_at = expires_at;
    }

    /// Stores a refresh token the provider rotated during a refresh.
    pub fn replace_refresh_token(&mut self, refresh_token: EncryptedSecret) {
        self.refresh_token = Some(refresh_token);
    }

    pub fn mark_synced(&mut self, at: Timestamp) {
        self.last_synced_at = Some(at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connection(expires_at: Timestamp, refresh: Option<&str>) -> CalendarConnection {
        CalendarConnection::new(
            UserId::new("user-1").unwrap(),
            EncryptedSecret::new("enc-access"),
            refresh.map(EncryptedSecret::new),
            expires_at,
            vec!["calendar.readonly".into()],
            Timestamp::from_unix_secs(0),
        )
    }

    #[test]
    fn needs_refresh_within_leeway() {
        let now = Timestamp::from_unix_secs(10_000);
        assert!(connection(now.plus_secs(60), None).needs_refresh(&now));
        assert!(connection(now.minus_minutes(1), None).needs_refresh(&now));
        assert!(!connection(now.plus_secs(61), None).needs_refresh(&now));
    }

    #[test]
    fn inherit_refresh_token_only_fills_missing() {
        let old = connection(Timestamp::from_unix_secs(0), Some("old-refresh"));

        let mut fresh = connection(Timestamp::from_unix_secs(0), None);
        fresh.inherit_refresh_token(&old);
        assert_eq!(fresh.refresh_token().map(|t| t.as_str()), Some("old-refresh"));

        let mut replaced = connection(Timestamp::from_unix_secs(0), Some("new-refresh"));
        replaced.inherit_refresh_token(&old);
        assert_eq!(replaced.refresh_token().map(|t| t.as_str()), Some("new-refresh"));
    }

    #[test]
    fn debug_never_prints_ciphertext() {
        let secret = EncryptedSecret::new("abc123");
        assert_eq!(format!("{:?}", secret), "EncryptedSecret(..)");
    }

    #[test]
    fn rotate_and_mark_synced() {
        let mut conn = connection(Timestamp::from_unix_secs(0), Some("r"));
        let later = Timestamp::from_unix_secs(3_600);
        conn.rotate_access_token(EncryptedSecret::new("enc-new"), later);
        conn.mark_synced(later);
        assert_eq!(conn.access_token().as_str(), "enc-new");
        assert_eq!(conn.expires_at(), &later);
        assert_eq!(conn.last_synced_at(), Some(&later));
    }
}
