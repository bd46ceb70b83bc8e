//! Open tasks pulled from the external task list.
//!
//! Users annotate tasks inline: `[45m]`, `[2h]` or `[1h30m]` sets the
//! estimate, `!high` / `!low` sets the priority. Tags are stripped from the
//! title shown in plans.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{Timestamp, ValidationError};

/// Estimates beyond a full working day are treated as typos.
const MAX_ESTIMATE_MINUTES: u32 = 12 * 60;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    High,
    #[default]
    Medium,
    Low,
}

impl TaskPriority {
    /// Sort rank, lower schedules first.
    pub fn rank(&self) -> u8 {
        match self {
            TaskPriority::High => 0,
            TaskPriority::Medium => 1,
            TaskPriority::Low => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::High => "high",
            TaskPriority::Medium => "medium",
            TaskPriority::Low => "low",
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskPriority {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high" => Ok(TaskPriority::High),
            "medium" => Ok(TaskPriority::Medium),
            "low" => Ok(TaskPriority::Low),
            other => Err(ValidationError::invalid_format(
                "priority",
                format!("unknown priority '{}'", other),
            )),
        }
    }
}

/// A task from the user's external task list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalTask {
    pub external_id: String,
    pub title: String,
    pub notes: Option<String>,
    pub due: Option<Timestamp>,
    pub estimate_minutes: Option<u32>,
    pub priority: TaskPriority,
    pub completed: bool,
}

impl ExternalTask {
    /// Builds a task from provider fields, reading estimate and priority tags
    /// from the title first and the notes second.
    pub fn from_provider(
        external_id: impl Into<String>,
        raw_title: &str,
        notes: Option<String>,
        due: Option<Timestamp>,
        completed: bool,
    ) -> Self {
        let title_tags = TaskTags::parse(raw_title);
        let note_tags = notes.as_deref().map(TaskTags::parse).unwrap_or_default();

        let title = if title_tags.cleaned.is_empty() {
            raw_title.trim().to_string()
        } else {
            title_tags.cleaned
        };

        Self {
            external_id: external_id.into(),
            title,
            notes,
            due,
            estimate_minutes: title_tags.estimate_minutes.or(note_tags.estimate_minutes),
            priority: title_tags
                .priority
                .or(note_tags.priority)
                .unwrap_or_default(),
            completed,
        }
    }

    /// Estimate used for scheduling.
    pub fn effective_estimate(&self, default_minutes: u32) -> u32 {
        self.estimate_minutes.unwrap_or(default_minutes)
    }

    /// Scheduling order: priority, then due date (none last), then estimate
    /// (shortest first), then title.
    pub fn schedule_order(&self, other: &Self, default_minutes: u32) -> Ordering {
        self.priority
            .rank()
            .cmp(&other.priority.rank())
            .then_with(|| match (&self.due, &other.due) {
                (Some(a), Some(b)) => a.cmp(b),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            })
            .then_with(|| {
                self.effective_estimate(default_minutes)
                    .cmp(&other.effective_estimate(default_minutes))
            })
            .then_with(|| self.title.cmp(&other.title))
    }
}

/// Tags recognised in a task title or notes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct TaskTags {
    estimate_minutes: Option<u32>,
    priority: Option<TaskPriority>,
    cleaned: String,
}

impl TaskTags {
    fn parse(text: &str) -> Self {
        let mut tags = TaskTags::default();
        let mut kept: Vec<&str> = Vec::new();

        for word in text.split_whitespace() {
            if let Some(minutes) = parse_estimate_tag(word) {
                tags.estimate_minutes.get_or_insert(minutes);
                continue;
            }
            match word.to_ascii_lowercase().as_str() {
                "!high" => {
                    tags.priority.get_or_insert(TaskPriority::High);
                }
                "!low" => {
                    tags.priority.get_or_insert(TaskPriority::Low);
                }
                "!medium" => {
                    tags.priority.get_or_insert(TaskPriority::Medium);
                }
                _ => kept.push(word),
            }
        }

        tags.cleaned = kept.join(" ");
        tags
    }
}

/// Parses `[45m]`, `[2h]`, `[1h30m]` into minutes.
fn parse_estimate_tag(word: &str) -> Option<u32> {
    let inner = word.strip_prefix('[')?.strip_suffix(']')?.to_ascii_lowercase();
    if inner.is_empty() {
        return None;
    }

    let mut total: u32 = 0;
    let mut digits = String::new();
    let mut saw_unit = false;

    for ch in inner.chars() {
        match ch {
            '0'..='9' => digits.push(ch),
            'h' | 'm' => {
                let value: u32 = digits.parse().ok()?;
                digits.clear();
                total = total.checked_add(if ch == 'h' { value.checked_mul(60)? } else { value })?;
                saw_unit = true;
            }
            _ => return None,
        }
    }

    if !digits.is_empty() || !saw_unit || total == 0 || total > MAX_ESTIMATE_MINUTES {
        return None;
    }
    Some(total)
}
