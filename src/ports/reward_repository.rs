//! RewardRepository port for badge unlocks and weekly score records.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::rewards::{UnlockedBadge, WeeklyScoreRecord};

#[async_trait]
pub trait RewardRepository: Send + Sync {
    /// All badges the user holds, oldest unlock first.
    async fn unlocked_badges(&self, user_id: &UserId) -> Result<Vec<UnlockedBadge>, DomainError>;

    /// Record unlocks. Badges the user already holds keep their original
    /// unlock time.
    async fn unlock_badges(
        &self,
        user_id: &UserId,
        badges: &[UnlockedBadge],
    ) -> Result<(), DomainError>;

    /// Insert or replace the score for the record's user and week.
    async fn save_weekly_score(&self, record: &WeeklyScoreRecord) -> Result<(), DomainError>;

    async fn find_weekly_score(
        &self,
        user_id: &UserId,
        week_start: NaiveDate,
    ) -> Result<Option<WeeklyScoreRecord>, DomainError>;
}
