//! In-memory `PlanRepository`.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::plan::DailyPlan;
use crate::ports::PlanRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryPlanRepository {
    plans: Arc<RwLock<BTreeMap<(UserId, NaiveDate), DailyPlan>>>,
}

impl InMemoryPlanRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.plans.read().await.len()
    }
}

#[async_trait]
impl PlanRepository for InMemoryPlanRepository {
    async fn save(&self, plan: &DailyPlan) -> Result<(), DomainError> {
        self.plans
            .write()
            .await
            .insert((plan.user_id().clone(), plan.date()), plan.clone());
        Ok(())
    }

    async fn update(&self, plan: &DailyPlan) -> Result<(), DomainError> {
        let mut plans = self.plans.write().await;
        match plans.get_mut(&(plan.user_id().clone(), plan.date())) {
            Some(stored) if stored.id() == plan.id() => {
                *stored = plan.clone();
                Ok(())
            }
            _ => Err(DomainError::new(ErrorCode::PlanNotFound, "Plan not found")),
        }
    }

    async fn find_by_date(
        &self,
        user_id: &UserId,
        date: NaiveDate,
    ) -> Result<Option<DailyPlan>, DomainError> {
        Ok(self.plans.read().await.get(&(user_id.clone(), date)).cloned())
    }

    async fn find_in_range(
        &self,
        user_id: &UserId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<DailyPlan>, DomainError> {
        if from > to {
            return Ok(Vec::new());
        }
        Ok(self
            .plans
            .read()
            .await
            .range((user_id.clone(), from)..=(user_id.clone(), to))
            .map(|(_, plan)| plan.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;
    use crate::domain::plan::PlanSource;

    fn plan(user: &str, day: u32) -> DailyPlan {
        DailyPlan::new(
            UserId::new(user).unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
            vec![],
            PlanSource::Fallback,
            "",
            vec![],
            Timestamp::now(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn save_replaces_plan_for_same_date() {
        let repo = InMemoryPlanRepository::new();
        repo.save(&plan("u-1", 6)).await.unwrap();
        let replacement = plan("u-1", 6);
        repo.save(&replacement).await.unwrap();

        assert_eq!(repo.count().await, 1);
        let stored = repo
            .find_by_date(replacement.user_id(), replacement.date())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.id(), replacement.id());
    }

    #[tokio::test]
    async fn range_is_inclusive_and_scoped_to_user() {
        let repo = InMemoryPlanRepository::new();
        for day in 5..=9 {
            repo.save(&plan("u-1", day)).await.unwrap();
        }
        repo.save(&plan("u-2", 7)).await.unwrap();

        let user = UserId::new("u-1").unwrap();
        let found = repo
            .find_in_range(
                &user,
                NaiveDate::from_ymd_opt(2024, 5, 6).unwrap(),
                NaiveDate::from_ymd_opt(2024, 5, 8).unwrap(),
            )
            .await
            .unwrap();

        let days: Vec<u32> = found.iter().map(|p| chrono::Datelike::day(&p.date())).collect();
        assert_eq!(days, vec![6, 7, 8]);
    }

    #[tokio::test]
    async fn update_of_replaced_plan_is_not_found() {
        let repo = InMemoryPlanRepository::new();
        let original = plan("u-1", 6);
        repo.save(&original).await.unwrap();
        repo.save(&plan("u-1", 6)).await.unwrap();

        let err = repo.update(&original).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::PlanNotFound);
    }
}
