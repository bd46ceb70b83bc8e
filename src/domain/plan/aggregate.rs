//! DailyPlan aggregate.
//!
//! A plan is the ordered, non-overlapping schedule of one local day. It is
//! replaced wholesale on regeneration; afterwards only block statuses change.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{BlockStatus, ScheduleBlock};
use crate::domain::foundation::{BlockId, DomainError, ErrorCode, PlanId, Timestamp, UserId};

/// Who produced the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanSource {
    Ai,
    Fallback,
}

impl PlanSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanSource::Ai => "ai",
            PlanSource::Fallback => "fallback",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ai" => Some(PlanSource::Ai),
            "fallback" => Some(PlanSource::Fallback),
            _ => None,
        }
    }
}

/// An open task that did not fit into the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnscheduledTask {
    pub task_id: String,
    pub title: String,
    pub estimate_minutes: u32,
}

/// The schedule of one local day.
///
/// # Invariants
///
/// - blocks are sorted by start
/// - no two blocks overlap
/// - every block has `end > start` (guaranteed by `TimeSpan`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyPlan {
    id: PlanId,
    user_id: UserId,
    date: NaiveDate,
    blocks: Vec<ScheduleBlock>,
    source: PlanSource,
    summary: String,
    unscheduled_tasks: Vec<UnscheduledTask>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl DailyPlan {
    /// Creates a plan, sorting blocks by start.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if any two blocks overlap
    pub fn new(
        user_id: UserId,
        date: NaiveDate,
        mut blocks: Vec<ScheduleBlock>,
        source: PlanSource,
        summary: impl Into<String>,
        unscheduled_tasks: Vec<UnscheduledTask>,
        now: Timestamp,
    ) -> Result<Self, DomainError> {
        blocks.sort_by_key(|b| b.span.start());
        Self::validate_no_overlap(&blocks)?;

        Ok(Self {
            id: PlanId::new(),
            user_id,
            date,
            blocks,
            source,
            summary: summary.into(),
            unscheduled_tasks,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute a plan from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: PlanId,
        user_id: UserId,
        date: NaiveDate,
        blocks: Vec<ScheduleBlock>,
        source: PlanSource,
        summary: String,
        unscheduled_tasks: Vec<UnscheduledTask>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            user_id,
            date,
            blocks,
            source,
            summary,
            unscheduled_tasks,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &PlanId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn blocks(&self) -> &[ScheduleBlock] {
        &self.blocks
    }

    pub fn source(&self) -> PlanSource {
        self.source
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn unscheduled_tasks(&self) -> &[UnscheduledTask] {
        &self.unscheduled_tasks
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Focus and Task blocks.
    pub fn work_blocks(&self) -> impl Iterator<Item = &ScheduleBlock> {
        self.blocks.iter().filter(|b| b.kind.is_work())
    }

    pub fn block(&self, block_id: &BlockId) -> Option<&ScheduleBlock> {
        self.blocks.iter().find(|b| &b.id == block_id)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Marks a block Completed or Skipped.
    ///
    /// Completing stamps `completed_at`; skipping clears it.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if `status` is `Planned`
    /// - `BlockNotFound` if the block is not in this plan
    pub fn set_block_status(
        &mut self,
        block_id: &BlockId,
        status: BlockStatus,
        now: Timestamp,
    ) -> Result<&ScheduleBlock, DomainError> {
        if status == BlockStatus::Planned {
            return Err(DomainError::validation(
                "status",
                "Block status can only be set to completed or skipped",
            ));
        }

        let block = self
            .blocks
            .iter_mut()
            .find(|b| &b.id == block_id)
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::BlockNotFound,
                    format!("Block {} not found in plan for {}", block_id, self.date),
                )
            })?;

        block.status = status;
        block.completed_at = match status {
            BlockStatus::Completed => Some(now),
            _ => None,
        };
        self.updated_at = now;
        Ok(block)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn validate_no_overlap(sorted: &[ScheduleBlock]) -> Result<(), DomainError> {
        for pair in sorted.windows(2) {
            if pair[0].span.overlaps(&pair[1].span) {
                return Err(DomainError::validation(
                    "blocks",
                    format!("Blocks '{}' and '{}' overlap", pair[0].title, pair[1].title),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::TimeSpan;
    use crate::domain::plan::BlockKind;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 6, h, m, 0).unwrap()
    }

    fn block(kind: BlockKind, title: &str, from: (u32, u32), to: (u32, u32)) -> ScheduleBlock {
        ScheduleBlock::new(kind, title, TimeSpan::new(at(from.0, from.1), at(to.0, to.1)).unwrap())
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 6).unwrap()
    }

    fn plan(blocks: Vec<ScheduleBlock>) -> Result<DailyPlan, DomainError> {
        DailyPlan::new(
            UserId::new("user-1").unwrap(),
            date(),
            blocks,
            PlanSource::Fallback,
            "",
            vec![],
            Timestamp::from_datetime(at(7, 0)),
        )
    }

    #[test]
    fn new_sorts_blocks_by_start() {
        let p = plan(vec![
            block(BlockKind::Task, "later", (11, 0), (12, 0)),
            block(BlockKind::Focus, "early", (9, 0), (10, 0)),
        ])
        .unwrap();
        let titles: Vec<_> = p.blocks().iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["early", "later"]);
    }

    #[test]
    fn new_rejects_overlapping_blocks() {
        let err = plan(vec![
            block(BlockKind::Focus, "a", (9, 0), (10, 0)),
            block(BlockKind::Meeting, "b", (9, 30), (10, 30)),
        ])
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn adjacent_blocks_are_allowed() {
        assert!(plan(vec![
            block(BlockKind::Focus, "a", (9, 0), (10, 0)),
            block(BlockKind::Break, "b", (10, 0), (10, 15)),
        ])
        .is_ok());
    }

    #[test]
    fn completing_a_block_stamps_completed_at() {
        let mut p = plan(vec![block(BlockKind::Task, "a", (9, 0), (10, 0))]).unwrap();
        let id = p.blocks()[0].id;
        let now = Timestamp::from_datetime(at(10, 5));

        let updated = p.set_block_status(&id, BlockStatus::Completed, now).unwrap();
        assert_eq!(updated.status, BlockStatus::Completed);
        assert_eq!(updated.completed_at, Some(now));
        assert_eq!(p.updated_at(), &now);

        let skipped = p.set_block_status(&id, BlockStatus::Skipped, now).unwrap();
        assert_eq!(skipped.completed_at, None);
    }

    #[test]
    fn planned_is_not_a_valid_target() {
        let mut p = plan(vec![block(BlockKind::Task, "a", (9, 0), (10, 0))]).unwrap();
        let id = p.blocks()[0].id;
        let err = p
            .set_block_status(&id, BlockStatus::Planned, Timestamp::now())
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn unknown_block_is_not_found() {
        let mut p = plan(vec![]).unwrap();
        let err = p
            .set_block_status(&BlockId::new(), BlockStatus::Completed, Timestamp::now())
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::BlockNotFound);
    }
}
