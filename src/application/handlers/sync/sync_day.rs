//! SyncDayHandler - Pulls one local day of events and the open tasks.
//!
//! Without a stored connection the snapshot is simply empty. With one, the
//! access token is refreshed when it is about to expire, and the rotated
//! tokens are written back encrypted before any data is fetched.

use chrono::NaiveDate;
use secrecy::Secret;
use std::sync::Arc;

use crate::application::handlers::local_day;
use crate::application::handlers::profile::load_profile;
use crate::domain::calendar::{CalendarConnection, SyncSnapshot};
use crate::domain::foundation::{CommandMetadata, DomainError, Timestamp};
use crate::domain::profile::UserProfile;
use crate::ports::{
    CalendarError, CalendarProvider, ConnectionRepository, ProfileRepository, SecretCipher,
};

/// Query for one local date.
#[derive(Debug, Clone, Copy)]
pub struct SyncDayQuery {
    pub date: NaiveDate,
}

/// Handler for syncing a day from the calendar provider.
pub struct SyncDayHandler {
    profiles: Arc<dyn ProfileRepository>,
    connections: Arc<dyn ConnectionRepository>,
    provider: Arc<dyn CalendarProvider>,
    cipher: Arc<dyn SecretCipher>,
}

impl SyncDayHandler {
    pub fn new(
        profiles: Arc<dyn ProfileRepository>,
        connections: Arc<dyn ConnectionRepository>,
        provider: Arc<dyn CalendarProvider>,
        cipher: Arc<dyn SecretCipher>,
    ) -> Self {
        Self {
            profiles,
            connections,
            provider,
            cipher,
        }
    }

    pub async fn handle(
        &self,
        query: SyncDayQuery,
        metadata: CommandMetadata,
    ) -> Result<SyncSnapshot, DomainError> {
        let profile = load_profile(self.profiles.as_ref(), &metadata.user_id).await?;
        self.snapshot(&profile, query.date, &metadata).await
    }

    /// Syncs `date` in the profile's local time.
    pub(crate) async fn snapshot(
        &self,
        profile: &UserProfile,
        date: NaiveDate,
        metadata: &CommandMetadata,
    ) -> Result<SyncSnapshot, DomainError> {
        let Some(mut connection) = self.connections.find_by_user(profile.user_id()).await? else {
            tracing::debug!(user_id = %profile.user_id(), "no calendar connection; empty snapshot");
            return Ok(SyncSnapshot::empty(date));
        };

        let now = metadata.now();
        let access_token = self.access_token(&mut connection, now).await?;

        let day = local_day(profile.utc_offset(), date)?;
        let events = self.provider.list_events(&access_token, day).await?;
        let tasks = self.provider.list_tasks(&access_token).await?;

        connection.mark_synced(now);
        self.connections.upsert(&connection).await?;

        tracing::info!(
            user_id = %profile.user_id(),
            date = %date,
            events = events.len(),
            tasks = tasks.len(),
            "calendar synced"
        );

        Ok(SyncSnapshot {
            date,
            events,
            tasks,
            synced_at: Some(now),
        })
    }

    /// Returns a usable plaintext access token, refreshing it when needed.
    async fn access_token(
        &self,
        connection: &mut CalendarConnection,
        now: Timestamp,
    ) -> Result<Secret<String>, DomainError> {
        if !connection.needs_refresh(&now) {
            return Ok(self.cipher.decrypt(connection.access_token())?);
        }

        let sealed = connection.refresh_token().ok_or_else(|| {
            CalendarError::InvalidGrant("access token expired and no refresh token is stored".into())
        })?;
        let refresh_token = self.cipher.decrypt(sealed)?;
        let tokens = self.provider.refresh(&refresh_token).await?;

        connection.rotate_access_token(
            self.cipher.encrypt(&tokens.access_token)?,
            now.plus_secs(tokens.expires_in_secs),
        );
        if let Some(rotated) = &tokens.refresh_token {
            connection.replace_refresh_token(self.cipher.encrypt(rotated)?);
        }
        self.connections.upsert(connection).await?;

        tracing::debug!(user_id = %connection.user_id(), "calendar access token refreshed");

        Ok(tokens.access_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        InMemoryConnectionRepository, InMemoryProfileRepository, ProviderCall,
        StaticCalendarProvider,
    };
    use crate::application::test_support::{at, cipher, metadata_at, monday, profile, user};
    use crate::domain::calendar::{CalendarEvent, ExternalTask};
    use crate::domain::foundation::{ErrorCode, TimeSpan};
    use crate::domain::profile::ProfilePatch;
    use secrecy::ExposeSecret;

    struct Fixture {
        profiles: InMemoryProfileRepository,
        connections: InMemoryConnectionRepository,
        provider: StaticCalendarProvider,
    }

    impl Fixture {
        async fn new(provider: StaticCalendarProvider) -> Self {
            let profiles = InMemoryProfileRepository::new();
            profiles.create(&profile()).await.unwrap();
            Self {
                profiles,
                connections: InMemoryConnectionRepository::new(),
                provider,
            }
        }

        async fn connect(&self, access: &str, refresh: Option<&str>, expires_at: Timestamp) {
            let cipher = cipher();
            let connection = CalendarConnection::new(
                user(),
                cipher.encrypt(&Secret::new(access.to_string())).unwrap(),
                refresh.map(|r| cipher.encrypt(&Secret::new(r.to_string())).unwrap()),
                expires_at,
                vec![],
                at(monday(), 6, 0),
            );
            self.connections.upsert(&connection).await.unwrap();
        }

        fn handler(&self) -> SyncDayHandler {
            SyncDayHandler::new(
                Arc::new(self.profiles.clone()),
                Arc::new(self.connections.clone()),
                Arc::new(self.provider.clone()),
                Arc::new(cipher()),
            )
        }

        async fn stored(&self) -> CalendarConnection {
            self.connections.find_by_user(&user()).await.unwrap().unwrap()
        }
    }

    fn event(id: &str, date: NaiveDate, hour: u32) -> CalendarEvent {
        let span = TimeSpan::starting_at(*at(date, hour, 0).as_datetime(), 30).unwrap();
        CalendarEvent::timed(id, id, span)
    }

    fn query() -> SyncDayQuery {
        SyncDayQuery { date: monday() }
    }

    #[tokio::test]
    async fn no_connection_gives_empty_snapshot() {
        let fixture = Fixture::new(StaticCalendarProvider::new()).await;

        let snapshot = fixture
            .handler()
            .handle(query(), metadata_at(at(monday(), 7, 0)))
            .await
            .unwrap();

        assert!(!snapshot.is_connected());
        assert!(snapshot.events.is_empty());
        assert!(fixture.provider.calls().is_empty());
    }

    #[tokio::test]
    async fn fetches_local_day_and_marks_synced() {
        let provider = StaticCalendarProvider::new()
            .with_event(event("today", monday(), 10))
            .with_event(event("tomorrow", monday().succ_opt().unwrap(), 10))
            .with_task(ExternalTask::from_provider("t1", "Write report", None, None, false))
            .with_task(ExternalTask::from_provider("t2", "Done already", None, None, true));
        let fixture = Fixture::new(provider).await;
        fixture.connect("live-token", Some("r"), at(monday(), 12, 0)).await;
        let now = at(monday(), 7, 0);

        let snapshot = fixture.handler().handle(query(), metadata_at(now)).await.unwrap();

        assert_eq!(snapshot.events.len(), 1);
        assert_eq!(snapshot.events[0].external_id, "today");
        assert_eq!(snapshot.tasks.len(), 1);
        assert_eq!(snapshot.synced_at, Some(now));
        assert_eq!(fixture.provider.refresh_count(), 0);
        assert_eq!(
            fixture.provider.calls()[0],
            ProviderCall::ListEvents {
                access_token: "live-token".into()
            }
        );
        assert_eq!(fixture.stored().await.last_synced_at(), Some(&now));
    }

    #[tokio::test]
    async fn local_day_follows_profile_offset() {
        let provider = StaticCalendarProvider::new()
            // 23:00 UTC Sunday is 01:00 Monday at UTC+2.
            .with_event(event("late", monday().pred_opt().unwrap(), 23))
            .with_event(event("evening", monday(), 22));
        let fixture = Fixture::new(provider).await;
        let mut profile = profile();
        profile
            .apply(
                ProfilePatch {
                    utc_offset_minutes: Some(120),
                    ..Default::default()
                },
                at(monday(), 6, 0),
            )
            .unwrap();
        fixture.profiles.update(&profile).await.unwrap();
        fixture.connect("live-token", None, at(monday(), 12, 0)).await;

        let snapshot = fixture
            .handler()
            .handle(query(), metadata_at(at(monday(), 7, 0)))
            .await
            .unwrap();

        let ids: Vec<_> = snapshot.events.iter().map(|e| e.external_id.as_str()).collect();
        assert_eq!(ids, vec!["late"]);
    }

    #[tokio::test]
    async fn refreshes_token_expiring_within_a_minute() {
        let fixture = Fixture::new(StaticCalendarProvider::new()).await;
        let now = at(monday(), 7, 0);
        fixture.connect("stale-token", Some("refresh-0"), now.plus_secs(30)).await;

        fixture.handler().handle(query(), metadata_at(now)).await.unwrap();

        assert_eq!(fixture.provider.refresh_count(), 1);
        assert_eq!(
            fixture.provider.calls()[1],
            ProviderCall::ListEvents {
                access_token: "access-1".into()
            }
        );
        let stored = fixture.stored().await;
        assert_eq!(*stored.expires_at(), now.plus_secs(3_600));
        let access = cipher().decrypt(stored.access_token()).unwrap();
        assert_eq!(access.expose_secret(), "access-1");
        let refresh = cipher().decrypt(stored.refresh_token().unwrap()).unwrap();
        assert_eq!(refresh.expose_secret(), "refresh-1");
    }

    #[tokio::test]
    async fn expired_without_refresh_token_requires_reconnect() {
        let fixture = Fixture::new(StaticCalendarProvider::new()).await;
        let now = at(monday(), 7, 0);
        fixture.connect("stale-token", None, now.minus_minutes(5)).await;

        let err = fixture.handler().handle(query(), metadata_at(now)).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::CalendarProviderError);
        assert!(fixture.provider.calls().is_empty());
    }

    #[tokio::test]
    async fn provider_failure_maps_to_provider_error() {
        let provider = StaticCalendarProvider::new().with_error(CalendarError::RateLimited);
        let fixture = Fixture::new(provider).await;
        fixture.connect("live-token", None, at(monday(), 12, 0)).await;

        let err = fixture
            .handler()
            .handle(query(), metadata_at(at(monday(), 7, 0)))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::CalendarProviderError);
        assert!(fixture.stored().await.last_synced_at().is_none());
    }

    #[tokio::test]
    async fn requires_profile() {
        let handler = SyncDayHandler::new(
            Arc::new(InMemoryProfileRepository::new()),
            Arc::new(InMemoryConnectionRepository::new()),
            Arc::new(StaticCalendarProvider::new()),
            Arc::new(cipher()),
        );

        let err = handler
            .handle(query(), metadata_at(at(monday(), 7, 0)))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ProfileNotFound);
    }
}
