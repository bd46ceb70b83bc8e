//! Omni Score - the weekly composite engagement score.

use serde::{Deserialize, Serialize};

use super::stats::ratio;
use super::{WeeklyStats, DAYS_PER_WEEK};

pub const COMPLETION_WEIGHT: f64 = 40.0;
pub const FOCUS_QUALITY_WEIGHT: f64 = 30.0;
pub const CONSISTENCY_WEIGHT: f64 = 20.0;
pub const RESPONSIVENESS_WEIGHT: f64 = 10.0;

pub const MAX_SCORE: u8 = 100;

/// Band a score falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreTier {
    Building,
    Steady,
    Strong,
    Elite,
}

impl ScoreTier {
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=39 => ScoreTier::Building,
            40..=69 => ScoreTier::Steady,
            70..=89 => ScoreTier::Strong,
            _ => ScoreTier::Elite,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreTier::Building => "building",
            ScoreTier::Steady => "steady",
            ScoreTier::Strong => "strong",
            ScoreTier::Elite => "elite",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "building" => Some(ScoreTier::Building),
            "steady" => Some(ScoreTier::Steady),
            "strong" => Some(ScoreTier::Strong),
            "elite" => Some(ScoreTier::Elite),
            _ => None,
        }
    }
}

/// The four score inputs, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponents {
    pub completion: f64,
    pub focus_quality: f64,
    pub consistency: f64,
    pub responsiveness: f64,
}

impl ScoreComponents {
    /// # Edge Cases
    /// - nothing planned: completion 0
    /// - no focus and no drift: focus quality 0
    /// - no nudges sent: responsiveness 1
    pub fn from_stats(stats: &WeeklyStats) -> Self {
        let responsiveness = if stats.nudges_sent == 0 {
            1.0
        } else {
            ratio(stats.nudges_acknowledged as f64, stats.nudges_sent as f64)
        };

        Self {
            completion: clamp_unit(ratio(
                stats.completed_blocks as f64,
                stats.planned_blocks as f64,
            )),
            focus_quality: clamp_unit(ratio(
                stats.focus_minutes.max(0) as f64,
                (stats.focus_minutes.max(0) + stats.drift_minutes.max(0)) as f64,
            )),
            consistency: clamp_unit(stats.check_in_days as f64 / DAYS_PER_WEEK as f64),
            responsiveness: clamp_unit(responsiveness),
        }
    }

    fn weighted_total(&self) -> f64 {
        COMPLETION_WEIGHT * self.completion
            + FOCUS_QUALITY_WEIGHT * self.focus_quality
            + CONSISTENCY_WEIGHT * self.consistency
            + RESPONSIVENESS_WEIGHT * self.responsiveness
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OmniScore {
    pub value: u8,
    pub tier: ScoreTier,
    pub components: ScoreComponents,
}

impl OmniScore {
    pub fn compute(stats: &WeeklyStats) -> Self {
        let components = ScoreComponents::from_stats(stats);
        let value = components
            .weighted_total()
            .round()
            .clamp(0.0, MAX_SCORE as f64) as u8;

        Self {
            value,
            tier: ScoreTier::from_score(value),
            components,
        }
    }
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn stats() -> WeeklyStats {
        WeeklyStats::default()
    }

    #[test]
    fn empty_week_scores_only_responsiveness() {
        let score = OmniScore::compute(&stats());
        assert_eq!(score.components.completion, 0.0);
        assert_eq!(score.components.focus_quality, 0.0);
        assert_eq!(score.components.responsiveness, 1.0);
        assert_eq!(score.value, 10);
        assert_eq!(score.tier, ScoreTier::Building);
    }

    #[test]
    fn perfect_week_scores_one_hundred() {
        let s = WeeklyStats {
            planned_blocks: 10,
            completed_blocks: 10,
            focus_minutes: 600,
            drift_minutes: 0,
            check_in_days: 7,
            nudges_sent: 2,
            nudges_acknowledged: 2,
            ..stats()
        };
        let score = OmniScore::compute(&s);
        assert_eq!(score.value, 100);
        assert_eq!(score.tier, ScoreTier::Elite);
    }

    #[test]
    fn mixed_week_matches_weighted_formula() {
        // completion 0.75, focus 0.8, consistency 4/7, responsiveness 0.5
        let s = WeeklyStats {
            planned_blocks: 8,
            completed_blocks: 6,
            focus_minutes: 400,
            drift_minutes: 100,
            check_in_days: 4,
            nudges_sent: 4,
            nudges_acknowledged: 2,
            ..stats()
        };
        // 30 + 24 + 11.43 + 5 = 70.43
        let score = OmniScore::compute(&s);
        assert_eq!(score.value, 70);
        assert_eq!(score.tier, ScoreTier::Strong);
    }

    #[test]
    fn tier_boundaries() {
        assert_eq!(ScoreTier::from_score(39), ScoreTier::Building);
        assert_eq!(ScoreTier::from_score(40), ScoreTier::Steady);
        assert_eq!(ScoreTier::from_score(69), ScoreTier::Steady);
        assert_eq!(ScoreTier::from_score(70), ScoreTier::Strong);
        assert_eq!(ScoreTier::from_score(89), ScoreTier::Strong);
        assert_eq!(ScoreTier::from_score(90), ScoreTier::Elite);
        assert_eq!(ScoreTier::from_score(100), ScoreTier::Elite);
    }

    fn arb_stats() -> impl Strategy<Value = WeeklyStats> {
        (
            0u32..50,
            0u32..50,
            0i64..5000,
            0i64..5000,
            0u32..=7,
            0u32..20,
            0u32..20,
        )
            .prop_map(|(planned, completed, focus, drift, days, sent, acked)| WeeklyStats {
                planned_blocks: planned,
                completed_blocks: completed.min(planned),
                focus_minutes: focus,
                drift_minutes: drift,
                drift_events: 0,
                check_in_days: days,
                nudges_sent: sent,
                nudges_acknowledged: acked.min(sent),
                longest_check_in_streak: days,
            })
    }

    proptest! {
        #[test]
        fn score_is_always_within_bounds(s in arb_stats()) {
            let score = OmniScore::compute(&s);
            prop_assert!(score.value <= 100);
            prop_assert_eq!(score.tier, ScoreTier::from_score(score.value));
            for c in [
                score.components.completion,
                score.components.focus_quality,
                score.components.consistency,
                score.components.responsiveness,
            ] {
                prop_assert!((0.0..=1.0).contains(&c));
            }
        }

        #[test]
        fn completing_more_never_lowers_score(s in arb_stats()) {
            prop_assume!(s.completed_blocks < s.planned_blocks);
            let better = WeeklyStats { completed_blocks: s.completed_blocks + 1, ..s };
            prop_assert!(OmniScore::compute(&better).value >= OmniScore::compute(&s).value);
        }

        #[test]
        fn more_drift_never_raises_score(s in arb_stats(), extra in 1i64..500) {
            let worse = WeeklyStats { drift_minutes: s.drift_minutes + extra, ..s };
            prop_assert!(OmniScore::compute(&worse).value <= OmniScore::compute(&s).value);
        }
    }
}
