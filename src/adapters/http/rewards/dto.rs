//! Response bodies for the rewards endpoints.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::foundation::Timestamp;
use crate::domain::rewards::{
    Badge, FocusGoalProgress, ScoreComponents, ScoreTier, UnlockedBadge, WeeklyHighlights,
    WeeklyReport, WeeklyStats,
};

#[derive(Debug, Clone, Serialize)]
pub struct BadgeSummary {
    pub badge: Badge,
    pub title: &'static str,
    pub description: &'static str,
}

impl From<Badge> for BadgeSummary {
    fn from(badge: Badge) -> Self {
        Self {
            badge,
            title: badge.title(),
            description: badge.description(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WeeklyScoreResponse {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub score: u8,
    pub tier: ScoreTier,
    pub components: ScoreComponents,
    pub stats: WeeklyStats,
    pub highlights: WeeklyHighlights,
    pub earned: Vec<BadgeSummary>,
    pub newly_unlocked: Vec<BadgeSummary>,
    pub focus_goal: Option<FocusGoalProgress>,
    pub previous_score: Option<u8>,
    pub computed_at: Timestamp,
}

impl From<WeeklyReport> for WeeklyScoreResponse {
    fn from(report: WeeklyReport) -> Self {
        Self {
            week_start: report.week_start,
            week_end: report.week_end,
            score: report.score.value,
            tier: report.score.tier,
            components: report.score.components,
            stats: report.stats,
            highlights: report.highlights,
            earned: report.earned.into_iter().map(BadgeSummary::from).collect(),
            newly_unlocked: report.newly_unlocked.into_iter().map(BadgeSummary::from).collect(),
            focus_goal: report.focus_goal,
            previous_score: report.previous_score,
            computed_at: report.computed_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BadgeResponse {
    #[serde(flatten)]
    pub summary: BadgeSummary,
    pub unlocked_at: Timestamp,
    pub week_start: NaiveDate,
}

impl From<UnlockedBadge> for BadgeResponse {
    fn from(unlocked: UnlockedBadge) -> Self {
        Self {
            summary: unlocked.badge.into(),
            unlocked_at: unlocked.unlocked_at,
            week_start: unlocked.week_start,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn badge_response_flattens_summary() {
        let unlocked = UnlockedBadge {
            badge: Badge::DeepDiver,
            unlocked_at: Timestamp::from_unix_secs(1_715_000_000),
            week_start: NaiveDate::from_ymd_opt(2024, 5, 6).unwrap(),
        };

        let json = serde_json::to_value(BadgeResponse::from(unlocked)).unwrap();

        assert_eq!(json["badge"], "deep_diver");
        assert_eq!(json["title"], "Deep Diver");
        assert_eq!(json["week_start"], "2024-05-06");
    }
}
