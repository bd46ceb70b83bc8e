//! Scoring, badge and insight handlers.

mod compute_weekly_score;
mod get_daily_insights;
mod list_badges;

pub use compute_weekly_score::{ComputeWeeklyScoreHandler, ComputeWeeklyScoreQuery};
pub use get_daily_insights::{GetDailyInsightsHandler, GetDailyInsightsQuery};
pub use list_badges::ListBadgesHandler;
