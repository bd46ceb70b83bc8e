//! ListBadgesHandler - Badges the user holds.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::rewards::UnlockedBadge;
use crate::ports::RewardRepository;

pub struct ListBadgesHandler {
    rewards: Arc<dyn RewardRepository>,
}

impl ListBadgesHandler {
    pub fn new(rewards: Arc<dyn RewardRepository>) -> Self {
        Self { rewards }
    }

    pub async fn handle(&self, user_id: &UserId) -> Result<Vec<UnlockedBadge>, DomainError> {
        self.rewards.unlocked_badges(user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryRewardRepository;
    use crate::application::test_support::{at, monday, other_user, user};
    use crate::domain::rewards::Badge;

    #[tokio::test]
    async fn lists_only_own_badges() {
        let rewards = InMemoryRewardRepository::new();
        rewards
            .unlock_badges(
                &user(),
                &[UnlockedBadge {
                    badge: Badge::FirstCheckIn,
                    unlocked_at: at(monday(), 18, 0),
                    week_start: monday(),
                }],
            )
            .await
            .unwrap();
        let handler = ListBadgesHandler::new(Arc::new(rewards));

        assert_eq!(handler.handle(&user()).await.unwrap().len(), 1);
        assert!(handler.handle(&other_user()).await.unwrap().is_empty());
    }
}
