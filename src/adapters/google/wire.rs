//! Google API payloads and their conversion into domain types.

use chrono::{DateTime, NaiveDate, Utc};
use reqwest::StatusCode;
use secrecy::Secret;
use serde::Deserialize;

use crate::domain::calendar::{CalendarEvent, ExternalTask};
use crate::domain::foundation::{TimeSpan, Timestamp};
use crate::ports::{CalendarError, OAuthTokens};

#[derive(Debug, Deserialize)]
pub(super) struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default = "default_expires_in")]
    pub expires_in: i64,
    #[serde(default)]
    pub scope: Option<String>,
}

fn default_expires_in() -> i64 {
    3600
}

impl From<TokenResponse> for OAuthTokens {
    fn from(wire: TokenResponse) -> Self {
        OAuthTokens {
            access_token: Secret::new(wire.access_token),
            refresh_token: wire.refresh_token.map(Secret::new),
            expires_in_secs: wire.expires_in,
            scopes: wire
                .scope
                .map(|s| s.split_whitespace().map(str::to_string).collect())
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct OAuthErrorBody {
    pub error: String,
    #[serde(default)]
    pub error_description: Option<String>,
}

/// One page of a Google list endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct Page<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct EventTime {
    #[serde(rename = "dateTime", default)]
    pub date_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub(super) struct EventItem {
    pub id: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    pub start: EventTime,
    pub end: EventTime,
}

impl EventItem {
    /// `None` for cancelled events and events without a usable time range.
    pub fn into_event(self) -> Option<CalendarEvent> {
        if self.status.as_deref() == Some("cancelled") {
            return None;
        }
        let title = self
            .summary
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| "Busy".to_string());

        let (start, end, all_day) = match (self.start.date_time, self.end.date_time) {
            (Some(start), Some(end)) => (start, end, false),
            _ => {
                let start = self.start.date?.and_hms_opt(0, 0, 0)?.and_utc();
                let end = self.end.date?.and_hms_opt(0, 0, 0)?.and_utc();
                (start, end, true)
            }
        };

        let span = TimeSpan::new(start, end).ok()?;
        Some(CalendarEvent {
            external_id: self.id,
            title,
            span,
            all_day,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct TaskListItem {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct TaskItem {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub due: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub deleted: bool,
}

impl TaskItem {
    /// `None` for deleted and untitled tasks.
    pub fn into_task(self) -> Option<ExternalTask> {
        if self.deleted {
            return None;
        }
        let title = self.title.filter(|t| !t.trim().is_empty())?;
        let completed = self.status.as_deref() == Some("completed");
        Some(ExternalTask::from_provider(
            self.id,
            &title,
            self.notes.filter(|n| !n.trim().is_empty()),
            self.due.map(Timestamp::from_datetime),
            completed,
        ))
    }
}

/// Maps a failed API response to a `CalendarError`.
pub(super) fn error_for_status(status: StatusCode, body: &str) -> CalendarError {
    if let Ok(oauth) = serde_json::from_str::<OAuthErrorBody>(body) {
        if oauth.error == "invalid_grant" {
            return CalendarError::InvalidGrant(oauth.error_description.unwrap_or(oauth.error));
        }
    }

    match status.as_u16() {
        401 => CalendarError::Unauthorized,
        429 => CalendarError::RateLimited,
        500..=599 => CalendarError::Unavailable(format!("{}: {}", status, body)),
        _ => CalendarError::Parse(format!("unexpected status {}: {}", status, body)),
    }
}
