//! Rewards module - the weekly and daily scoring engine.
//!
//! Pure, stateless computation over rows the application layer has already
//! fetched: weekly stats, the Omni Score, badge unlocks, highlights, and daily
//! insights (drift, focus window, burnout risk). No ports or I/O.
//!
//! # Components
//!
//! - `WeeklyStats` - per-week totals from plans, check-ins, drifts and nudges
//! - `OmniScore` - weighted composite score with tier
//! - `BadgeEvaluator` - ordered, once-only badge unlocks
//! - `HighlightRanker` - best day and trigger ranking with tie-breaks
//! - `DailyInsights` - hourly buckets, peak focus window, burnout risk

mod badges;
mod highlights;
mod insights;
mod report;
mod score;
mod stats;
mod week;

#[cfg(test)]
pub(crate) mod test_support;

pub use badges::{Badge, BadgeContext, BadgeEvaluator, UnlockedBadge};
pub use highlights::{HighlightRanker, TriggerSummary, WeeklyHighlights};
pub use insights::{
    BurnoutFactor, BurnoutLevel, BurnoutRisk, DailyInsights, DayActivity, FocusWindow, HourBucket,
};
pub use report::{FocusGoalProgress, WeeklyReport, WeeklyScoreRecord};
pub use score::{OmniScore, ScoreComponents, ScoreTier};
pub use stats::{drift_minutes_in, DayStats, WeekActivity, WeeklyStats};
pub use week::{WeekRange, DAYS_PER_WEEK};
