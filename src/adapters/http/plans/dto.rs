//! Request and response bodies for the plan endpoints.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;
use crate::domain::plan::{
    BlockKind, BlockStatus, DailyPlan, PlanSource, ScheduleBlock, UnscheduledTask,
};

/// PATCH /api/plans/:date/blocks/:block_id
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateBlockStatusRequest {
    pub status: BlockStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct BlockResponse {
    pub id: String,
    pub title: String,
    pub kind: BlockKind,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub minutes: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_ref: Option<String>,
    pub status: BlockStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<Timestamp>,
}

impl From<&ScheduleBlock> for BlockResponse {
    fn from(block: &ScheduleBlock) -> Self {
        Self {
            id: block.id.to_string(),
            title: block.title.clone(),
            kind: block.kind,
            start: block.span.start(),
            end: block.span.end(),
            minutes: block.minutes(),
            task_ref: block.task_ref.clone(),
            status: block.status,
            completed_at: block.completed_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanResponse {
    pub id: String,
    pub date: NaiveDate,
    pub source: PlanSource,
    pub summary: String,
    pub blocks: Vec<BlockResponse>,
    pub unscheduled_tasks: Vec<UnscheduledTask>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&DailyPlan> for PlanResponse {
    fn from(plan: &DailyPlan) -> Self {
        Self {
            id: plan.id().to_string(),
            date: plan.date(),
            source: plan.source(),
            summary: plan.summary().to_string(),
            blocks: plan.blocks().iter().map(BlockResponse::from).collect(),
            unscheduled_tasks: plan.unscheduled_tasks().to_vec(),
            created_at: *plan.created_at(),
            updated_at: *plan.updated_at(),
        }
    }
}
