//! Badge catalogue and unlock evaluation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{OmniScore, WeeklyStats, DAYS_PER_WEEK};
use crate::domain::foundation::Timestamp;
use crate::domain::plan::{BlockKind, DailyPlan};

pub const STREAK_BADGE_DAYS: u32 = 3;
pub const DEEP_DIVER_MINUTES: i64 = 90;
pub const PERFECT_DAY_MIN_BLOCKS: usize = 3;
pub const RESPONSIVE_MIN_NUDGES: u32 = 3;
pub const ELITE_SCORE: u8 = 90;

/// Achievements, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Badge {
    FirstCheckIn,
    ThreeDayStreak,
    FullWeek,
    DeepDiver,
    PerfectDay,
    DriftTamer,
    Responsive,
    OmniElite,
}

impl Badge {
    pub const ALL: [Badge; 8] = [
        Badge::FirstCheckIn,
        Badge::ThreeDayStreak,
        Badge::FullWeek,
        Badge::DeepDiver,
        Badge::PerfectDay,
        Badge::DriftTamer,
        Badge::Responsive,
        Badge::OmniElite,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Badge::FirstCheckIn => "first_check_in",
            Badge::ThreeDayStreak => "three_day_streak",
            Badge::FullWeek => "full_week",
            Badge::DeepDiver => "deep_diver",
            Badge::PerfectDay => "perfect_day",
            Badge::DriftTamer => "drift_tamer",
            Badge::Responsive => "responsive",
            Badge::OmniElite => "omni_elite",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Badge::ALL.into_iter().find(|b| b.as_str() == s)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Badge::FirstCheckIn => "First Check-in",
            Badge::ThreeDayStreak => "Three-Day Streak",
            Badge::FullWeek => "Full Week",
            Badge::DeepDiver => "Deep Diver",
            Badge::PerfectDay => "Perfect Day",
            Badge::DriftTamer => "Drift Tamer",
            Badge::Responsive => "Responsive",
            Badge::OmniElite => "Omni Elite",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Badge::FirstCheckIn => "Logged a check-in",
            Badge::ThreeDayStreak => "Checked in three days in a row",
            Badge::FullWeek => "Checked in every day of the week",
            Badge::DeepDiver => "Completed a focus block of 90 minutes or more",
            Badge::PerfectDay => "Finished every work block of a day with at least three",
            Badge::DriftTamer => "Cut drift time to 75% of the previous week or less",
            Badge::Responsive => "Acknowledged every nudge in a week with at least three",
            Badge::OmniElite => "Reached an Omni Score of 90",
        }
    }
}

/// A badge the user holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlockedBadge {
    pub badge: Badge,
    pub unlocked_at: Timestamp,
    /// Monday of the week that earned it.
    pub week_start: NaiveDate,
}

/// Inputs for badge evaluation.
#[derive(Debug, Clone, Copy)]
pub struct BadgeContext<'a> {
    pub stats: &'a WeeklyStats,
    pub score: &'a OmniScore,
    /// Plans of the evaluated week.
    pub plans: &'a [&'a DailyPlan],
    pub previous_week_drift_minutes: i64,
}

pub struct BadgeEvaluator;

impl BadgeEvaluator {
    /// Every badge whose criteria the week meets, in evaluation order.
    pub fn earned(ctx: &BadgeContext<'_>) -> Vec<Badge> {
        Badge::ALL
            .into_iter()
            .filter(|badge| Self::meets(*badge, ctx))
            .collect()
    }

    /// Earned badges not already held, in evaluation order.
    pub fn newly_unlocked(earned: &[Badge], already: &[Badge]) -> Vec<Badge> {
        earned
            .iter()
            .copied()
            .filter(|badge| !already.contains(badge))
            .collect()
    }

    fn meets(badge: Badge, ctx: &BadgeContext<'_>) -> bool {
        let stats = ctx.stats;
        match badge {
            Badge::FirstCheckIn => stats.check_in_days >= 1,
            Badge::ThreeDayStreak => stats.longest_check_in_streak >= STREAK_BADGE_DAYS,
            Badge::FullWeek => stats.check_in_days >= DAYS_PER_WEEK,
            Badge::DeepDiver => ctx.plans.iter().any(|plan| {
                plan.blocks().iter().any(|b| {
                    b.kind == BlockKind::Focus && b.is_completed() && b.minutes() >= DEEP_DIVER_MINUTES
                })
            }),
            Badge::PerfectDay => ctx.plans.iter().any(|plan| {
                let work: Vec<_> = plan.work_blocks().collect();
                work.len() >= PERFECT_DAY_MIN_BLOCKS && work.iter().all(|b| b.is_completed())
            }),
            Badge::DriftTamer => {
                ctx.previous_week_drift_minutes > 0
                    && stats.drift_minutes * 4 <= ctx.previous_week_drift_minutes * 3
            }
            Badge::Responsive => {
                stats.nudges_sent >= RESPONSIVE_MIN_NUDGES
                    && stats.nudges_acknowledged == stats.nudges_sent
            }
            Badge::OmniElite => ctx.score.value >= ELITE_SCORE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::plan::BlockStatus;
    use crate::domain::rewards::test_support::*;

    fn evaluate(stats: WeeklyStats, plans: &[DailyPlan], previous_drift: i64) -> Vec<Badge> {
        let score = OmniScore::compute(&stats);
        let refs: Vec<&DailyPlan> = plans.iter().collect();
        BadgeEvaluator::earned(&BadgeContext {
            stats: &stats,
            score: &score,
            plans: &refs,
            previous_week_drift_minutes: previous_drift,
        })
    }

    #[test]
    fn check_in_badges() {
        let stats = WeeklyStats {
            check_in_days: 3,
            longest_check_in_streak: 3,
            ..Default::default()
        };
        assert_eq!(evaluate(stats, &[], 0), vec![Badge::FirstCheckIn, Badge::ThreeDayStreak]);

        let full = WeeklyStats {
            check_in_days: 7,
            longest_check_in_streak: 7,
            ..Default::default()
        };
        assert!(evaluate(full, &[], 0).contains(&Badge::FullWeek));
    }

    #[test]
    fn deep_diver_needs_completed_long_focus_block() {
        let short = vec![plan_on(
            monday(),
            vec![block_at(monday(), BlockKind::Focus, 9, 0, 89, BlockStatus::Completed)],
        )];
        assert!(!evaluate(WeeklyStats::default(), &short, 0).contains(&Badge::DeepDiver));

        let long_task = vec![plan_on(
            monday(),
            vec![block_at(monday(), BlockKind::Task, 9, 0, 120, BlockStatus::Completed)],
        )];
        assert!(!evaluate(WeeklyStats::default(), &long_task, 0).contains(&Badge::DeepDiver));

        let long = vec![plan_on(
            monday(),
            vec![block_at(monday(), BlockKind::Focus, 9, 0, 90, BlockStatus::Completed)],
        )];
        assert!(evaluate(WeeklyStats::default(), &long, 0).contains(&Badge::DeepDiver));
    }

    #[test]
    fn perfect_day_needs_three_completed_work_blocks() {
        let blocks = |last: BlockStatus| {
            vec![
                block_at(monday(), BlockKind::Task, 9, 0, 30, BlockStatus::Completed),
                block_at(monday(), BlockKind::Task, 10, 0, 30, BlockStatus::Completed),
                block_at(monday(), BlockKind::Meeting, 11, 0, 30, BlockStatus::Planned),
                block_at(monday(), BlockKind::Focus, 12, 0, 30, last),
            ]
        };
        let perfect = vec![plan_on(monday(), blocks(BlockStatus::Completed))];
        assert!(evaluate(WeeklyStats::default(), &perfect, 0).contains(&Badge::PerfectDay));

        let skipped = vec![plan_on(monday(), blocks(BlockStatus::Skipped))];
        assert!(!evaluate(WeeklyStats::default(), &skipped, 0).contains(&Badge::PerfectDay));
    }

    #[test]
    fn drift_tamer_compares_with_previous_week() {
        let stats = |drift| WeeklyStats {
            drift_minutes: drift,
            ..Default::default()
        };
        assert!(evaluate(stats(75), &[], 100).contains(&Badge::DriftTamer));
        assert!(!evaluate(stats(76), &[], 100).contains(&Badge::DriftTamer));
        assert!(!evaluate(stats(0), &[], 0).contains(&Badge::DriftTamer));
    }

    #[test]
    fn responsive_requires_three_all_acknowledged() {
        let stats = |sent, acked| WeeklyStats {
            nudges_sent: sent,
            nudges_acknowledged: acked,
            ..Default::default()
        };
        assert!(evaluate(stats(3, 3), &[], 0).contains(&Badge::Responsive));
        assert!(!evaluate(stats(2, 2), &[], 0).contains(&Badge::Responsive));
        assert!(!evaluate(stats(4, 3), &[], 0).contains(&Badge::Responsive));
    }

    #[test]
    fn elite_at_ninety() {
        let stats = WeeklyStats {
            planned_blocks: 4,
            completed_blocks: 4,
            focus_minutes: 240,
            check_in_days: 7,
            longest_check_in_streak: 7,
            ..Default::default()
        };
        let earned = evaluate(stats, &[], 0);
        assert!(earned.contains(&Badge::OmniElite));
        assert_eq!(earned.last(), Some(&Badge::OmniElite));
    }

    #[test]
    fn newly_unlocked_excludes_held_badges() {
        let stats = WeeklyStats {
            check_in_days: 3,
            longest_check_in_streak: 3,
            ..Default::default()
        };
        let score = OmniScore::compute(&stats);
        let ctx = BadgeContext {
            stats: &stats,
            score: &score,
            plans: &[],
            previous_week_drift_minutes: 0,
        };
        let earned = BadgeEvaluator::earned(&ctx);
        assert_eq!(
            BadgeEvaluator::newly_unlocked(&earned, &[Badge::FirstCheckIn]),
            vec![Badge::ThreeDayStreak]
        );
        assert!(BadgeEvaluator::newly_unlocked(&earned, &[Badge::FirstCheckIn, Badge::ThreeDayStreak]).is_empty());
    }

    #[test]
    fn badge_names_round_trip() {
        for badge in Badge::ALL {
            assert_eq!(Badge::parse(badge.as_str()), Some(badge));
        }
    }
}
