//! Google Calendar and Tasks implementation of `CalendarProvider`.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::wire::{error_for_status, EventItem, Page, TaskItem, TaskListItem, TokenResponse};
use crate::domain::calendar::{CalendarEvent, ExternalTask};
use crate::domain::foundation::TimeSpan;
use crate::ports::{CalendarError, CalendarProvider, OAuthTokens};

/// Guards against runaway pagination.
const MAX_PAGES: usize = 10;

/// Configuration for the Google adapter. Base URLs are overridable for tests.
#[derive(Debug)]
pub struct GoogleConfig {
    pub client_id: String,
    client_secret: Secret<String>,
    pub redirect_uri: String,
    pub oauth_base_url: String,
    pub calendar_base_url: String,
    pub tasks_base_url: String,
    pub timeout: Duration,
}

impl GoogleConfig {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: Secret<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret,
            redirect_uri: redirect_uri.into(),
            oauth_base_url: "https://oauth2.googleapis.com".to_string(),
            calendar_base_url: "https://www.googleapis.com/calendar/v3".to_string(),
            tasks_base_url: "https://tasks.googleapis.com/tasks/v1".to_string(),
            timeout: Duration::from_secs(15),
        }
    }

    pub fn with_base_urls(
        mut self,
        oauth: impl Into<String>,
        calendar: impl Into<String>,
        tasks: impl Into<String>,
    ) -> Self {
        self.oauth_base_url = oauth.into();
        self.calendar_base_url = calendar.into();
        self.tasks_base_url = tasks.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn token_url(&self) -> String {
        format!("{}/token", self.oauth_base_url.trim_end_matches('/'))
    }

    fn events_url(&self) -> String {
        format!(
            "{}/calendars/primary/events",
            self.calendar_base_url.trim_end_matches('/')
        )
    }

    fn task_lists_url(&self) -> String {
        format!("{}/users/@me/lists", self.tasks_base_url.trim_end_matches('/'))
    }

    fn tasks_url(&self, list_id: &str) -> String {
        format!("{}/lists/{}/tasks", self.tasks_base_url.trim_end_matches('/'), list_id)
    }
}

pub struct GoogleCalendarProvider {
    config: GoogleConfig,
    client: Client,
}

impl GoogleCalendarProvider {
    /// # Errors
    ///
    /// `CalendarError::Unavailable` if the HTTP client cannot be built.
    pub fn new(config: GoogleConfig) -> Result<Self, CalendarError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CalendarError::Unavailable(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { config, client })
    }

    async fn token_request(&self, params: &[(&str, &str)]) -> Result<OAuthTokens, CalendarError> {
        let wire: TokenResponse = self
            .send(self.client.post(self.config.token_url()).form(params))
            .await?;
        Ok(wire.into())
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, CalendarError> {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                CalendarError::Unavailable("request timed out".to_string())
            } else {
                CalendarError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "google api call failed");
            return Err(error_for_status(status, &body));
        }

        response
            .json()
            .await
            .map_err(|e| CalendarError::Parse(e.to_string()))
    }

    /// Follows `nextPageToken` up to `MAX_PAGES` pages.
    async fn get_all<T: DeserializeOwned>(
        &self,
        url: &str,
        access_token: &Secret<String>,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, CalendarError> {
        let mut items = Vec::new();
        let mut page_token: Option<String> = None;

        for _ in 0..MAX_PAGES {
            let mut request = self
                .client
                .get(url)
                .bearer_auth(access_token.expose_secret())
                .query(query);
            if let Some(ref token) = page_token {
                request = request.query(&[("pageToken", token.as_str())]);
            }

            let page: Page<T> = self.send(request).await?;
            items.extend(page.items);
            page_token = page.next_page_token;
            if page_token.is_none() {
                break;
            }
        }

        Ok(items)
    }
}

#[async_trait]
impl CalendarProvider for GoogleCalendarProvider {
    async fn exchange_code(&self, code: &str) -> Result<OAuthTokens, CalendarError> {
        self.token_request(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.expose_secret().as_str()),
            ("redirect_uri", self.config.redirect_uri.as_str()),
        ])
        .await
    }

    async fn refresh(&self, refresh_token: &Secret<String>) -> Result<OAuthTokens, CalendarError> {
        self.token_request(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token.expose_secret().as_str()),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.expose_secret().as_str()),
        ])
        .await
    }

    async fn list_events(
        &self,
        access_token: &Secret<String>,
        span: TimeSpan,
    ) -> Result<Vec<CalendarEvent>, CalendarError> {
        let query = [
            ("timeMin", span.start().to_rfc3339()),
            ("timeMax", span.end().to_rfc3339()),
            ("singleEvents", "true".to_string()),
            ("orderBy", "startTime".to_string()),
            ("maxResults", "250".to_string()),
        ];
        let items: Vec<EventItem> = self
            .get_all(&self.config.events_url(), access_token, &query)
            .await?;

        let events: Vec<CalendarEvent> = items.into_iter().filter_map(EventItem::into_event).collect();
        tracing::debug!(count = events.len(), "fetched calendar events");
        Ok(events)
    }

    async fn list_tasks(&self, access_token: &Secret<String>) -> Result<Vec<ExternalTask>, CalendarError> {
        let lists: Vec<TaskListItem> = self
            .get_all(&self.config.task_lists_url(), access_token, &[])
            .await?;

        let query = [
            ("showCompleted", "false".to_string()),
            ("showHidden", "false".to_string()),
            ("maxResults", "100".to_string()),
        ];
        let mut tasks = Vec::new();
        for list in lists {
            let items: Vec<TaskItem> = self
                .get_all(&self.config.tasks_url(&list.id), access_token, &query)
                .await?;
            tasks.extend(items.into_iter().filter_map(TaskItem::into_task).filter(|t| !t.completed));
        }

        tracing::debug!(count = tasks.len(), "fetched open tasks");
        Ok(tasks)
    }
}

impl std::fmt::Debug for GoogleCalendarProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleCalendarProvider")
            .field("client_id", &self.config.client_id)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GoogleConfig {
        GoogleConfig::new("client-1", Secret::new("shh".to_string()), "https://app/callback")
    }

    #[test]
    fn default_urls_point_at_google() {
        let config = config();
        assert_eq!(config.token_url(), "https://oauth2.googleapis.com/token");
        assert_eq!(
            config.events_url(),
            "https://www.googleapis.com/calendar/v3/calendars/primary/events"
        );
        assert_eq!(config.task_lists_url(), "https://tasks.googleapis.com/tasks/v1/users/@me/lists");
        assert_eq!(config.tasks_url("L1"), "https://tasks.googleapis.com/tasks/v1/lists/L1/tasks");
    }

    #[test]
    fn base_urls_are_overridable() {
        let config = config().with_base_urls("http://localhost:1/", "http://localhost:2", "http://localhost:3");
        assert_eq!(config.token_url(), "http://localhost:1/token");
        assert_eq!(config.events_url(), "http://localhost:2/calendars/primary/events");
        assert_eq!(config.tasks_url("x"), "http://localhost:3/lists/x/tasks");
    }

    #[test]
    fn debug_hides_client_secret() {
        let provider = GoogleCalendarProvider::new(config()).unwrap();
        let debug = format!("{:?}", provider);
        assert!(debug.contains("client-1"));
        assert!(!debug.contains("shh"));
    }
}
