//! Weekly aggregation of plans and signals.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::WeekRange;
use crate::domain::foundation::UtcOffset;
use crate::domain::plan::DailyPlan;
use crate::domain::signals::{CheckIn, DriftReport, Nudge};

/// Everything the engine reads for one week, already fetched.
///
/// Rows outside the week are tolerated and filtered by local date.
#[derive(Debug, Clone, Copy)]
pub struct WeekActivity<'a> {
    pub week: WeekRange,
    pub utc_offset: UtcOffset,
    pub plans: &'a [DailyPlan],
    pub check_ins: &'a [CheckIn],
    pub drifts: &'a [DriftReport],
    pub nudges: &'a [Nudge],
}

impl<'a> WeekActivity<'a> {
    pub fn plans_in_week(&self) -> impl Iterator<Item = &'a DailyPlan> + '_ {
        self.plans.iter().filter(move |p| self.week.contains(p.date()))
    }

    pub fn check_ins_in_week(&self) -> impl Iterator<Item = &'a CheckIn> + '_ {
        self.check_ins
            .iter()
            .filter(move |c| self.week.contains(self.utc_offset.local_date(c.recorded_at.as_datetime())))
    }

    pub fn drifts_in_week(&self) -> impl Iterator<Item = &'a DriftReport> + '_ {
        self.drifts
            .iter()
            .filter(move |d| self.week.contains(self.utc_offset.local_date(d.started_at.as_datetime())))
    }

    pub fn nudges_in_week(&self) -> impl Iterator<Item = &'a Nudge> + '_ {
        self.nudges
            .iter()
            .filter(move |n| self.week.contains(self.utc_offset.local_date(n.created_at.as_datetime())))
    }

    /// Distinct local dates with at least one check-in.
    pub fn check_in_dates(&self) -> BTreeSet<NaiveDate> {
        self.check_ins_in_week()
            .map(|c| self.utc_offset.local_date(c.recorded_at.as_datetime()))
            .collect()
    }
}

/// Work-block totals for a single planned day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayStats {
    pub date: NaiveDate,
    pub planned_blocks: u32,
    pub completed_blocks: u32,
    pub focus_minutes: i64,
}

impl DayStats {
    pub fn from_plan(plan: &DailyPlan) -> Self {
        let mut stats = DayStats {
            date: plan.date(),
            planned_blocks: 0,
            completed_blocks: 0,
            focus_minutes: 0,
        };
        for block in plan.work_blocks() {
            stats.planned_blocks += 1;
            if block.is_completed() {
                stats.completed_blocks += 1;
                stats.focus_minutes += block.minutes();
            }
        }
        stats
    }

    pub fn completion_ratio(&self) -> f64 {
        ratio(self.completed_blocks as f64, self.planned_blocks as f64)
    }
}

/// Totals for one week.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyStats {
    /// Focus + Task blocks planned.
    pub planned_blocks: u32,
    pub completed_blocks: u32,
    /// Minutes of completed Focus + Task blocks.
    pub focus_minutes: i64,
    pub drift_minutes: i64,
    pub drift_events: u32,
    pub check_in_days: u32,
    pub nudges_sent: u32,
    pub nudges_acknowledged: u32,
    pub longest_check_in_streak: u32,
}

impl WeeklyStats {
    pub fn compute(activity: &WeekActivity<'_>) -> Self {
        let mut stats = WeeklyStats::default();

        for day in activity.plans_in_week().map(DayStats::from_plan) {
            stats.planned_blocks += day.planned_blocks;
            stats.completed_blocks += day.completed_blocks;
            stats.focus_minutes += day.focus_minutes;
        }

        for drift in activity.drifts_in_week() {
            stats.drift_minutes += drift.minutes as i64;
            stats.drift_events += 1;
        }

        for nudge in activity.nudges_in_week() {
            stats.nudges_sent += 1;
            if nudge.is_acknowledged() {
                stats.nudges_acknowledged += 1;
            }
        }

        let dates = activity.check_in_dates();
        stats.check_in_days = dates.len() as u32;
        stats.longest_check_in_streak = longest_streak(activity.week, &dates);

        stats
    }

    /// Per-day stats for every planned day of the week, in date order.
    pub fn days(activity: &WeekActivity<'_>) -> Vec<DayStats> {
        let mut days: Vec<DayStats> = activity.plans_in_week().map(DayStats::from_plan).collect();
        days.sort_by_key(|d| d.date);
        days
    }
}

/// Drift minutes whose local start date falls in `week`.
pub fn drift_minutes_in(week: WeekRange, offset: UtcOffset, drifts: &[DriftReport]) -> i64 {
    drifts
        .iter()
        .filter(|d| week.contains(offset.local_date(d.started_at.as_datetime())))
        .map(|d| d.minutes as i64)
        .sum()
}

fn longest_streak(week: WeekRange, dates: &BTreeSet<NaiveDate>) -> u32 {
    let mut best = 0;
    let mut current = 0;
    for day in week.days() {
        if dates.contains(&day) {
            current += 1;
            best = best.max(current);
        } else {
            current = 0;
        }
    }
    best
}

pub(crate) fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator <= 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}
