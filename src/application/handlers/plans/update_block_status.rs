//! UpdateBlockStatusHandler - Marks a plan block completed or skipped.

use chrono::NaiveDate;
use std::sync::Arc;

use super::get_plan::load_plan;
use crate::domain::foundation::{BlockId, CommandMetadata, DomainError};
use crate::domain::plan::{BlockStatus, DailyPlan};
use crate::ports::PlanRepository;

#[derive(Debug, Clone)]
pub struct UpdateBlockStatusCommand {
    pub date: NaiveDate,
    pub block_id: BlockId,
    pub status: BlockStatus,
}

pub struct UpdateBlockStatusHandler {
    plans: Arc<dyn PlanRepository>,
}

impl UpdateBlockStatusHandler {
    pub fn new(plans: Arc<dyn PlanRepository>) -> Self {
        Self { plans }
    }

    /// Returns the whole plan after the change.
    pub async fn handle(
        &self,
        cmd: UpdateBlockStatusCommand,
        metadata: CommandMetadata,
    ) -> Result<DailyPlan, DomainError> {
        let mut plan = load_plan(self.plans.as_ref(), &metadata.user_id, cmd.date).await?;

        plan.set_block_status(&cmd.block_id, cmd.status, metadata.now())?;
        self.plans.update(&plan).await?;

        tracing::debug!(
            user_id = %metadata.user_id,
            date = %cmd.date,
            block_id = %cmd.block_id,
            status = cmd.status.as_str(),
            "block status updated"
        );

        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryPlanRepository;
    use crate::application::test_support::{at, metadata_at, monday, user};
    use crate::domain::foundation::{ErrorCode, TimeSpan};
    use crate::domain::plan::{BlockKind, PlanSource, ScheduleBlock};

    async fn seeded() -> (InMemoryPlanRepository, BlockId) {
        let span = TimeSpan::starting_at(*at(monday(), 9, 0).as_datetime(), 90).unwrap();
        let block = ScheduleBlock::new(BlockKind::Focus, "Deep work", span);
        let block_id = block.id;
        let plan = DailyPlan::new(
            user(),
            monday(),
            vec![block],
            PlanSource::Fallback,
            "",
            vec![],
            at(monday(), 7, 0),
        )
        .unwrap();
        let plans = InMemoryPlanRepository::new();
        plans.save(&plan).await.unwrap();
        (plans, block_id)
    }

    fn command(block_id: BlockId, status: BlockStatus) -> UpdateBlockStatusCommand {
        UpdateBlockStatusCommand {
            date: monday(),
            block_id,
            status,
        }
    }

    #[tokio::test]
    async fn completing_stamps_and_persists() {
        let (plans, block_id) = seeded().await;
        let handler = UpdateBlockStatusHandler::new(Arc::new(plans.clone()));
        let now = at(monday(), 10, 35);

        let plan = handler
            .handle(command(block_id, BlockStatus::Completed), metadata_at(now))
            .await
            .unwrap();

        assert_eq!(plan.blocks()[0].status, BlockStatus::Completed);
        assert_eq!(plan.blocks()[0].completed_at, Some(now));
        let stored = plans.find_by_date(&user(), monday()).await.unwrap().unwrap();
        assert_eq!(stored.blocks()[0].status, BlockStatus::Completed);
    }

    #[tokio::test]
    async fn planned_is_not_a_target() {
        let (plans, block_id) = seeded().await;
        let handler = UpdateBlockStatusHandler::new(Arc::new(plans));

        let err = handler
            .handle(command(block_id, BlockStatus::Planned), metadata_at(at(monday(), 10, 0)))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn unknown_block_and_missing_plan() {
        let (plans, _) = seeded().await;
        let handler = UpdateBlockStatusHandler::new(Arc::new(plans));

        let err = handler
            .handle(command(BlockId::new(), BlockStatus::Skipped), metadata_at(at(monday(), 10, 0)))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::BlockNotFound);

        let mut missing = command(BlockId::new(), BlockStatus::Skipped);
        missing.date = monday().succ_opt().unwrap();
        let err = handler
            .handle(missing, metadata_at(at(monday(), 10, 0)))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::PlanNotFound);
    }
}
