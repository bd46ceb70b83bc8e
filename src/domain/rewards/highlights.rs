//! Weekly highlights: best day and top drift triggers.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

use super::DayStats;
use crate::domain::signals::{DriftReport, DriftTrigger};

/// Total drift attributed to one trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerSummary {
    pub trigger: DriftTrigger,
    pub minutes: i64,
    pub events: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyHighlights {
    pub best_day: Option<DayStats>,
    pub top_triggers: Vec<TriggerSummary>,
}

pub struct HighlightRanker;

impl HighlightRanker {
    /// Day with the highest completion ratio.
    ///
    /// # Edge Cases
    /// - days with nothing planned are excluded
    /// - ties go to more focus minutes, then the earlier date
    pub fn best_day(days: &[DayStats]) -> Option<DayStats> {
        days.iter()
            .filter(|d| d.planned_blocks > 0)
            .copied()
            .min_by(Self::compare_days)
    }

    /// Triggers ranked by minutes desc, then events desc, then name asc.
    pub fn rank_triggers<'a, I>(drifts: I) -> Vec<TriggerSummary>
    where
        I: IntoIterator<Item = &'a DriftReport>,
    {
        let mut totals: HashMap<DriftTrigger, TriggerSummary> = HashMap::new();
        for drift in drifts {
            let entry = totals.entry(drift.trigger).or_insert(TriggerSummary {
                trigger: drift.trigger,
                minutes: 0,
                events: 0,
            });
            entry.minutes += drift.minutes as i64;
            entry.events += 1;
        }

        let mut ranked: Vec<TriggerSummary> = totals.into_values().collect();
        ranked.sort_by(|a, b| {
            b.minutes
                .cmp(&a.minutes)
                .then_with(|| b.events.cmp(&a.events))
                .then_with(|| a.trigger.as_str().cmp(b.trigger.as_str()))
        });
        ranked
    }

    /// "Better" days order first.
    fn compare_days(a: &DayStats, b: &DayStats) -> Ordering {
        // Cross-multiplied to compare ratios exactly.
        let a_ratio = a.completed_blocks as u64 * b.planned_blocks as u64;
        let b_ratio = b.completed_blocks as u64 * a.planned_blocks as u64;
        b_ratio
            .cmp(&a_ratio)
            .then_with(|| b.focus_minutes.cmp(&a.focus_minutes))
            .then_with(|| a.date.cmp(&b.date))
    }
}
