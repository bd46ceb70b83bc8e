//! Static `CalendarProvider` for tests and offline runs.
//!
//! Serves a fixed set of events and tasks, issues predictable tokens, and
//! records every call. Queued errors are returned before any data.

use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::domain::calendar::{CalendarEvent, ExternalTask};
use crate::domain::foundation::TimeSpan;
use crate::ports::{CalendarError, CalendarProvider, OAuthTokens};

/// A recorded provider call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderCall {
    ExchangeCode(String),
    Refresh,
    ListEvents { access_token: String },
    ListTasks { access_token: String },
}

#[derive(Debug, Clone)]
pub struct StaticCalendarProvider {
    events: Arc<Mutex<Vec<CalendarEvent>>>,
    tasks: Arc<Mutex<Vec<ExternalTask>>>,
    errors: Arc<Mutex<VecDeque<CalendarError>>>,
    calls: Arc<Mutex<Vec<ProviderCall>>>,
    issued: Arc<Mutex<u32>>,
    expires_in_secs: i64,
    issue_refresh_token: bool,
}

impl Default for StaticCalendarProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl StaticCalendarProvider {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
            tasks: Arc::new(Mutex::new(Vec::new())),
            errors: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            issued: Arc::new(Mutex::new(0)),
            expires_in_secs: 3_600,
            issue_refresh_token: true,
        }
    }

    pub fn with_event(self, event: CalendarEvent) -> Self {
        self.events.lock().unwrap().push(event);
        self
    }

    pub fn with_task(self, task: ExternalTask) -> Self {
        self.tasks.lock().unwrap().push(task);
        self
    }

    /// Queues an error for the next call.
    pub fn with_error(self, error: CalendarError) -> Self {
        self.errors.lock().unwrap().push_back(error);
        self
    }

    pub fn with_expires_in(mut self, secs: i64) -> Self {
        self.expires_in_secs = secs;
        self
    }

    /// Token responses omit the refresh token.
    pub fn without_refresh_token(mut self) -> Self {
        self.issue_refresh_token = false;
        self
    }

    pub fn calls(&self) -> Vec<ProviderCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn refresh_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, ProviderCall::Refresh))
            .count()
    }

    fn record(&self, call: ProviderCall) -> Result<(), CalendarError> {
        self.calls.lock().unwrap().push(call);
        match self.errors.lock().unwrap().pop_front() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Tokens are numbered so tests can tell a refreshed token apart.
    fn issue_tokens(&self) -> OAuthTokens {
        let mut issued = self.issued.lock().unwrap();
        *issued += 1;
        OAuthTokens {
            access_token: Secret::new(format!("access-{}", *issued)),
            refresh_token: self
                .issue_refresh_token
                .then(|| Secret::new(format!("refresh-{}", *issued))),
            expires_in_secs: self.expires_in_secs,
            scopes: vec!["calendar.readonly".to_string(), "tasks.readonly".to_string()],
        }
    }
}

#[async_trait]
impl CalendarProvider for StaticCalendarProvider {
    async fn exchange_code(&self, code: &str) -> Result<OAuthTokens, CalendarError> {
        self.record(ProviderCall::ExchangeCode(code.to_string()))?;
        Ok(self.issue_tokens())
    }

    async fn refresh(&self, _refresh_token: &Secret<String>) -> Result<OAuthTokens, CalendarError> {
        self.record(ProviderCall::Refresh)?;
        Ok(self.issue_tokens())
    }

    async fn list_events(
        &self,
        access_token: &Secret<String>,
        span: TimeSpan,
    ) -> Result<Vec<CalendarEvent>, CalendarError> {
        self.record(ProviderCall::ListEvents {
            access_token: access_token.expose_secret().clone(),
        })?;
        Ok(self
            .events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.span.overlaps(&span))
            .cloned()
            .collect())
    }

    async fn list_tasks(&self, access_token: &Secret<String>) -> Result<Vec<ExternalTask>, CalendarError> {
        self.record(ProviderCall::ListTasks {
            access_token: access_token.expose_secret().clone(),
        })?;
        Ok(self
            .tasks
            .lock()
            .unwrap()
            .iter()
            .filter(|t| !t.completed)
            .cloned()
            .collect())
    }
}
