//! In-memory `RewardRepository`.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::rewards::{UnlockedBadge, WeeklyScoreRecord};
use crate::ports::RewardRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryRewardRepository {
    badges: Arc<RwLock<HashMap<UserId, Vec<UnlockedBadge>>>>,
    scores: Arc<RwLock<HashMap<(UserId, NaiveDate), WeeklyScoreRecord>>>,
}

impl InMemoryRewardRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RewardRepository for InMemoryRewardRepository {
    async fn unlocked_badges(&self, user_id: &UserId) -> Result<Vec<UnlockedBadge>, DomainError> {
        let mut badges = self
            .badges
            .read()
            .await
            .get(user_id)
            .cloned()
            .unwrap_or_default();
        badges.sort_by_key(|b| (b.unlocked_at, b.badge));
        Ok(badges)
    }

    async fn unlock_badges(
        &self,
        user_id: &UserId,
        badges: &[UnlockedBadge],
    ) -> Result<(), DomainError> {
        let mut all = self.badges.write().await;
        let held = all.entry(user_id.clone()).or_default();
        for unlock in badges {
            if !held.iter().any(|b| b.badge == unlock.badge) {
                held.push(unlock.clone());
            }
        }
        Ok(())
    }

    async fn save_weekly_score(&self, record: &WeeklyScoreRecord) -> Result<(), DomainError> {
        self.scores
            .write()
            .await
            .insert((record.user_id.clone(), record.week_start), record.clone());
        Ok(())
    }

    async fn find_weekly_score(
        &self,
        user_id: &UserId,
        week_start: NaiveDate,
    ) -> Result<Option<WeeklyScoreRecord>, DomainError> {
        Ok(self
            .scores
            .read()
            .await
            .get(&(user_id.clone(), week_start))
            .cloned())
    }
}
