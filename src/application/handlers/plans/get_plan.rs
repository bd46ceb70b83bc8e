//! GetPlanHandler - Reads the stored plan for a local date.

use chrono::NaiveDate;
use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::plan::DailyPlan;
use crate::ports::PlanRepository;

#[derive(Debug, Clone, Copy)]
pub struct GetPlanQuery {
    pub date: NaiveDate,
}

pub struct GetPlanHandler {
    plans: Arc<dyn PlanRepository>,
}

impl GetPlanHandler {
    pub fn new(plans: Arc<dyn PlanRepository>) -> Self {
        Self { plans }
    }

    pub async fn handle(&self, query: GetPlanQuery, user_id: &UserId) -> Result<DailyPlan, DomainError> {
        load_plan(self.plans.as_ref(), user_id, query.date).await
    }
}

pub(super) async fn load_plan(
    plans: &dyn PlanRepository,
    user_id: &UserId,
    date: NaiveDate,
) -> Result<DailyPlan, DomainError> {
    plans.find_by_date(user_id, date).await?.ok_or_else(|| {
        DomainError::new(ErrorCode::PlanNotFound, format!("No plan for {}", date))
            .with_detail("date", date.to_string())
    })
}
