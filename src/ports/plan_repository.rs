//! PlanRepository port for daily plan persistence.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::plan::DailyPlan;

/// Repository for daily plans, keyed by user and local date.
#[async_trait]
pub trait PlanRepository: Send + Sync {
    /// Store a plan, replacing any existing plan for the same user and date.
    async fn save(&self, plan: &DailyPlan) -> Result<(), DomainError>;

    /// Persist block status changes of an existing plan.
    ///
    /// # Errors
    ///
    /// - `PlanNotFound` if the plan was removed meanwhile
    async fn update(&self, plan: &DailyPlan) -> Result<(), DomainError>;

    async fn find_by_date(
        &self,
        user_id: &UserId,
        date: NaiveDate,
    ) -> Result<Option<DailyPlan>, DomainError>;

    /// Plans with `from <= date <= to`, ordered by date.
    async fn find_in_range(
        &self,
        user_id: &UserId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<DailyPlan>, DomainError>;
}
