//! Calendar events and the per-day sync snapshot.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ExternalTask;
use crate::domain::foundation::{TimeSpan, Timestamp};

/// An event from the user's external calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub external_id: String,
    pub title: String,
    pub span: TimeSpan,
    /// All-day events never block time in a plan.
    pub all_day: bool,
}

impl CalendarEvent {
    pub fn timed(external_id: impl Into<String>, title: impl Into<String>, span: TimeSpan) -> Self {
        Self {
            external_id: external_id.into(),
            title: title.into(),
            span,
            all_day: false,
        }
    }
}

/// Calendar events and open tasks for one local day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncSnapshot {
    pub date: NaiveDate,
    pub events: Vec<CalendarEvent>,
    pub tasks: Vec<ExternalTask>,
    /// `None` when the user has no calendar connected.
    pub synced_at: Option<Timestamp>,
}

impl SyncSnapshot {
    /// Snapshot for a user without a calendar connection.
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            events: Vec::new(),
            tasks: Vec::new(),
            synced_at: None,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.synced_at.is_some()
    }

    /// Tasks that still need doing.
    pub fn open_tasks(&self) -> impl Iterator<Item = &ExternalTask> {
        self.tasks.iter().filter(|t| !t.completed)
    }
}
