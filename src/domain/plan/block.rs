//! Schedule blocks: the rows of a daily plan.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{BlockId, TimeSpan, Timestamp, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Focus,
    Task,
    Meeting,
    Break,
    Buffer,
}

impl BlockKind {
    /// Focus and Task blocks are the user's own work; they drive completion.
    pub fn is_work(&self) -> bool {
        matches!(self, BlockKind::Focus | BlockKind::Task)
    }

    /// Kinds that count toward the day's load.
    pub fn is_load(&self) -> bool {
        matches!(self, BlockKind::Focus | BlockKind::Task | BlockKind::Meeting)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::Focus => "focus",
            BlockKind::Task => "task",
            BlockKind::Meeting => "meeting",
            BlockKind::Break => "break",
            BlockKind::Buffer => "buffer",
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "focus" => Ok(BlockKind::Focus),
            "task" => Ok(BlockKind::Task),
            "meeting" => Ok(BlockKind::Meeting),
            "break" => Ok(BlockKind::Break),
            "buffer" => Ok(BlockKind::Buffer),
            other => Err(ValidationError::invalid_format(
                "kind",
                format!("unknown block kind '{}'", other),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockStatus {
    #[default]
    Planned,
    Completed,
    Skipped,
}

impl BlockStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockStatus::Planned => "planned",
            BlockStatus::Completed => "completed",
            BlockStatus::Skipped => "skipped",
        }
    }
}

impl FromStr for BlockStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "planned" => Ok(BlockStatus::Planned),
            "completed" => Ok(BlockStatus::Completed),
            "skipped" => Ok(BlockStatus::Skipped),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown block status '{}'", other),
            )),
        }
    }
}

/// One scheduled slot of a daily plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleBlock {
    pub id: BlockId,
    pub title: String,
    pub kind: BlockKind,
    pub span: TimeSpan,
    /// External id of the task this block works on.
    pub task_ref: Option<String>,
    pub status: BlockStatus,
    pub completed_at: Option<Timestamp>,
}

impl ScheduleBlock {
    pub fn new(kind: BlockKind, title: impl Into<String>, span: TimeSpan) -> Self {
        Self {
            id: BlockId::new(),
            title: title.into(),
            kind,
            span,
            task_ref: None,
            status: BlockStatus::Planned,
            completed_at: None,
        }
    }

    pub fn with_task_ref(mut self, task_ref: impl Into<String>) -> Self {
        self.task_ref = Some(task_ref.into());
        self
    }

    pub fn minutes(&self) -> i64 {
        self.span.minutes()
    }

    pub fn is_completed(&self) -> bool {
        self.status == BlockStatus::Completed
    }

    pub fn is_completed_work(&self) -> bool {
        self.kind.is_work() && self.is_completed()
    }
}
