//! ComputeWeeklyScoreHandler - Scores the week containing a date.
//!
//! Loads the week plus the week before (for the drift comparison and the
//! stored score), runs the scoring engine, then persists newly unlocked
//! badges and the score record.

use chrono::NaiveDate;
use std::sync::Arc;

use crate::application::handlers::profile::load_profile;
use crate::domain::foundation::{CommandMetadata, DomainError, TimeSpan};
use crate::domain::rewards::{
    drift_minutes_in, Badge, UnlockedBadge, WeekActivity, WeekRange, WeeklyReport,
};
use crate::ports::{PlanRepository, ProfileRepository, RewardRepository, SignalRepository};

#[derive(Debug, Clone, Copy)]
pub struct ComputeWeeklyScoreQuery {
    /// Any local date within the week.
    pub date: NaiveDate,
}

pub struct ComputeWeeklyScoreHandler {
    profiles: Arc<dyn ProfileRepository>,
    plans: Arc<dyn PlanRepository>,
    signals: Arc<dyn SignalRepository>,
    rewards: Arc<dyn RewardRepository>,
}

impl ComputeWeeklyScoreHandler {
    pub fn new(
        profiles: Arc<dyn ProfileRepository>,
        plans: Arc<dyn PlanRepository>,
        signals: Arc<dyn SignalRepository>,
        rewards: Arc<dyn RewardRepository>,
    ) -> Self {
        Self {
            profiles,
            plans,
            signals,
            rewards,
        }
    }

    pub async fn handle(
        &self,
        query: ComputeWeeklyScoreQuery,
        metadata: CommandMetadata,
    ) -> Result<WeeklyReport, DomainError> {
        let user_id = &metadata.user_id;
        let profile = load_profile(self.profiles.as_ref(), user_id).await?;
        let offset = profile.utc_offset();

        let week = WeekRange::containing(query.date);
        let previous = week.previous();
        let span = TimeSpan::new(
            previous.utc_span(offset)?.start(),
            week.utc_span(offset)?.end(),
        )?;

        let plans = self.plans.find_in_range(user_id, week.start(), week.end()).await?;
        let check_ins = self.signals.check_ins_in(user_id, span).await?;
        let drifts = self.signals.drift_reports_in(user_id, span).await?;
        let nudges = self.signals.nudges_in(user_id, span).await?;

        let already: Vec<Badge> = self
            .rewards
            .unlocked_badges(user_id)
            .await?
            .into_iter()
            .map(|u| u.badge)
            .collect();

        let activity = WeekActivity {
            week,
            utc_offset: offset,
            plans: &plans,
            check_ins: &check_ins,
            drifts: &drifts,
            nudges: &nudges,
        };
        let previous_drift = drift_minutes_in(previous, offset, &drifts);
        let now = metadata.now();
        let previous_score = self
            .rewards
            .find_weekly_score(user_id, previous.start())
            .await?
            .map(|record| record.score);
        let report = WeeklyReport::compute(&activity, previous_drift, &already, now)
            .with_focus_goal(profile.weekly_focus_goal_minutes())
            .with_previous_score(previous_score);

        if !report.newly_unlocked.is_empty() {
            let unlocks: Vec<UnlockedBadge> = report
                .newly_unlocked
                .iter()
                .map(|badge| UnlockedBadge {
                    badge: *badge,
                    unlocked_at: now,
                    week_start: report.week_start,
                })
                .collect();
            self.rewards.unlock_badges(user_id, &unlocks).await?;
            for badge in &report.newly_unlocked {
                tracing::info!(user_id = %user_id, badge = badge.as_str(), "badge unlocked");
            }
        }

        self.rewards.save_weekly_score(&report.record(user_id.clone())).await?;

        tracing::info!(
            user_id = %user_id,
            week_start = %report.week_start,
            score = report.score.value,
            tier = report.score.tier.as_str(),
            "weekly score computed"
        );

        Ok(report)
    }
}
