//! Weekly report: stats, score, highlights and badges for one week.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{
    Badge, BadgeContext, BadgeEvaluator, HighlightRanker, OmniScore, ScoreTier, WeekActivity,
    WeeklyHighlights, WeeklyStats,
};
use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::plan::DailyPlan;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyReport {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub stats: WeeklyStats,
    pub score: OmniScore,
    pub highlights: WeeklyHighlights,
    /// All badges whose criteria this week meets.
    pub earned: Vec<Badge>,
    /// Earned badges the user did not hold before.
    pub newly_unlocked: Vec<Badge>,
    /// Completed focus time against the profile's weekly goal.
    pub focus_goal: Option<FocusGoalProgress>,
    /// Score stored for the week before, if one was computed.
    pub previous_score: Option<u8>,
    pub computed_at: Timestamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusGoalProgress {
    pub goal_minutes: u32,
    pub focus_minutes: i64,
    /// Share of the goal reached, capped at 100. A zero goal counts as met.
    pub percent: u8,
    pub met: bool,
}

impl FocusGoalProgress {
    pub fn new(goal_minutes: u32, focus_minutes: i64) -> Self {
        let goal = i64::from(goal_minutes);
        let percent = if goal == 0 {
            100
        } else {
            (focus_minutes.max(0) * 100 / goal).min(100) as u8
        };
        Self {
            goal_minutes,
            focus_minutes,
            percent,
            met: focus_minutes >= goal,
        }
    }
}

impl WeeklyReport {
    pub fn compute(
        activity: &WeekActivity<'_>,
        previous_week_drift_minutes: i64,
        already_unlocked: &[Badge],
        now: Timestamp,
    ) -> Self {
        let stats = WeeklyStats::compute(activity);
        let score = OmniScore::compute(&stats);
        let plans: Vec<&DailyPlan> = activity.plans_in_week().collect();

        let ctx = BadgeContext {
            stats: &stats,
            score: &score,
            plans: &plans,
            previous_week_drift_minutes,
        };
        let earned = BadgeEvaluator::earned(&ctx);
        let newly_unlocked = BadgeEvaluator::newly_unlocked(&earned, already_unlocked);

        let highlights = WeeklyHighlights {
            best_day: HighlightRanker::best_day(&WeeklyStats::days(activity)),
            top_triggers: HighlightRanker::rank_triggers(activity.drifts_in_week()),
        };

        Self {
            week_start: activity.week.start(),
            week_end: activity.week.end(),
            stats,
            score,
            highlights,
            earned,
            newly_unlocked,
            focus_goal: None,
            previous_score: None,
            computed_at: now,
        }
    }

    pub fn with_focus_goal(mut self, goal_minutes: u32) -> Self {
        self.focus_goal = Some(FocusGoalProgress::new(goal_minutes, self.stats.focus_minutes));
        self
    }

    pub fn with_previous_score(mut self, score: Option<u8>) -> Self {
        self.previous_score = score;
        self
    }

    /// The persisted summary of this report.
    pub fn record(&self, user_id: UserId) -> WeeklyScoreRecord {
        WeeklyScoreRecord {
            user_id,
            week_start: self.week_start,
            score: self.score.value,
            tier: self.score.tier,
            stats: self.stats,
            computed_at: self.computed_at,
        }
    }
}

/// Stored weekly score, one per user and week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyScoreRecord {
    pub user_id: UserId,
    pub week_start: NaiveDate,
    pub score: u8,
    pub tier: ScoreTier,
    pub stats: WeeklyStats,
    pub computed_at: Timestamp,
}
