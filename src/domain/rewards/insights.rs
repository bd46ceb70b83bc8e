//! Daily insights: drift, hourly activity, peak focus window, burnout risk.

use chrono::{Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::{HighlightRanker, TriggerSummary};
use crate::domain::foundation::{TimeSpan, UtcOffset, ValidationError};
use crate::domain::plan::DailyPlan;
use crate::domain::profile::WorkHours;
use crate::domain::signals::{average_rating, CheckIn, DriftReport};

/// Width of the peak focus window in hours.
pub const FOCUS_WINDOW_HOURS: usize = 2;
pub const HIGH_DRIFT_MINUTES: i64 = 90;

const HOURS_PER_DAY: usize = 24;

/// Activity within one local hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourBucket {
    /// Local hour, 0..=23.
    pub hour: u32,
    pub focus_minutes: i64,
    pub drift_minutes: i64,
}

impl HourBucket {
    pub fn net(&self) -> i64 {
        self.focus_minutes - self.drift_minutes
    }
}

/// The best contiguous window of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusWindow {
    pub start_hour: u32,
    /// Exclusive.
    pub end_hour: u32,
    /// Focus minus drift within the window; always positive.
    pub net_focus_minutes: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BurnoutLevel {
    Low,
    Moderate,
    High,
}

impl BurnoutLevel {
    pub fn from_points(points: u32) -> Self {
        match points {
            0..=1 => BurnoutLevel::Low,
            2..=3 => BurnoutLevel::Moderate,
            _ => BurnoutLevel::High,
        }
    }
}

/// A contributor to the burnout assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BurnoutFactor {
    VeryLowEnergy,
    LowEnergy,
    LowMood,
    Overloaded,
    HeavyLoad,
    AfterHoursWork,
    HighDrift,
}

impl BurnoutFactor {
    pub fn points(&self) -> u32 {
        match self {
            BurnoutFactor::VeryLowEnergy | BurnoutFactor::Overloaded => 2,
            _ => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BurnoutRisk {
    pub level: BurnoutLevel,
    pub points: u32,
    pub factors: Vec<BurnoutFactor>,
    pub average_energy: Option<f64>,
    pub average_mood: Option<f64>,
    /// Scheduled load over the work window; 1.0 is a full day.
    pub load_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyInsights {
    pub date: NaiveDate,
    pub drift_minutes: i64,
    pub drift_events: u32,
    pub triggers: Vec<TriggerSummary>,
    pub planned_blocks: u32,
    pub completed_blocks: u32,
    /// Hours with any focus or drift, ascending.
    pub hourly: Vec<HourBucket>,
    pub peak_focus_window: Option<FocusWindow>,
    pub burnout: BurnoutRisk,
}

/// Inputs for one local day, already fetched.
#[derive(Debug, Clone, Copy)]
pub struct DayActivity<'a> {
    pub date: NaiveDate,
    pub utc_offset: UtcOffset,
    pub work_hours: WorkHours,
    pub plan: Option<&'a DailyPlan>,
    pub check_ins: &'a [CheckIn],
    pub drifts: &'a [DriftReport],
}

impl DailyInsights {
    pub fn compute(day: &DayActivity<'_>) -> Result<Self, ValidationError> {
        let offset = day.utc_offset;
        let on_day = |instant: &chrono::DateTime<chrono::Utc>| offset.local_date(instant) == day.date;

        let drifts: Vec<&DriftReport> = day
            .drifts
            .iter()
            .filter(|d| on_day(d.started_at.as_datetime()))
            .collect();
        let check_ins: Vec<CheckIn> = day
            .check_ins
            .iter()
            .filter(|c| on_day(c.recorded_at.as_datetime()))
            .cloned()
            .collect();

        let drift_minutes: i64 = drifts.iter().map(|d| d.minutes as i64).sum();
        let (planned_blocks, completed_blocks) = day
            .plan
            .map(|plan| {
                plan.work_blocks().fold((0u32, 0u32), |(p, c), b| {
                    (p + 1, c + u32::from(b.is_completed()))
                })
            })
            .unwrap_or((0, 0));

        let buckets = hour_buckets(day)?;
        let peak_focus_window = peak_window(&buckets);
        let hourly = buckets
            .into_iter()
            .filter(|b| b.focus_minutes > 0 || b.drift_minutes > 0)
            .collect();

        let window = day.work_hours.window(day.date, offset)?;
        let burnout = assess_burnout(day.plan, &check_ins, drift_minutes, &window);

        Ok(Self {
            date: day.date,
            drift_minutes,
            drift_events: drifts.len() as u32,
            triggers: HighlightRanker::rank_triggers(drifts.iter().copied()),
            planned_blocks,
            completed_blocks,
            hourly,
            peak_focus_window,
            burnout,
        })
    }
}

/// Focus and drift overlap for each of the 24 local hours. Drifts count by
/// overlap, so one that started the evening before still fills hour 0.
fn hour_buckets(day: &DayActivity<'_>) -> Result<Vec<HourBucket>, ValidationError> {
    let midnight = day.utc_offset.to_utc(day.date, NaiveTime::MIN);

    let focus_spans: Vec<TimeSpan> = day
        .plan
        .map(|plan| {
            plan.blocks()
                .iter()
                .filter(|b| b.is_completed_work())
                .map(|b| b.span)
                .collect()
        })
        .unwrap_or_default();
    let drift_spans: Vec<TimeSpan> = day.drifts.iter().filter_map(|d| d.span()).collect();

    (0..HOURS_PER_DAY)
        .map(|hour| -> Result<HourBucket, ValidationError> {
            let span = TimeSpan::starting_at(midnight + Duration::hours(hour as i64), 60)?;
            Ok(HourBucket {
                hour: hour as u32,
                focus_minutes: focus_spans.iter().map(|s| s.overlap_minutes(&span)).sum(),
                drift_minutes: drift_spans.iter().map(|s| s.overlap_minutes(&span)).sum(),
            })
        })
        .collect()
}

/// Earliest contiguous window with the highest positive net focus.
fn peak_window(buckets: &[HourBucket]) -> Option<FocusWindow> {
    let mut best: Option<FocusWindow> = None;
    for window in buckets.windows(FOCUS_WINDOW_HOURS) {
        let net: i64 = window.iter().map(HourBucket::net).sum();
        if net <= 0 {
            continue;
        }
        if best.map_or(true, |b| net > b.net_focus_minutes) {
            best = Some(FocusWindow {
                start_hour: window[0].hour,
                end_hour: window[0].hour + FOCUS_WINDOW_HOURS as u32,
                net_focus_minutes: net,
            });
        }
    }
    best
}

fn assess_burnout(
    plan: Option<&DailyPlan>,
    check_ins: &[CheckIn],
    drift_minutes: i64,
    work_window: &TimeSpan,
) -> BurnoutRisk {
    let mut factors = Vec::new();

    let average_energy = average_rating(check_ins, |c| c.energy);
    match average_energy {
        Some(e) if e <= 2.0 => factors.push(BurnoutFactor::VeryLowEnergy),
        Some(e) if e <= 3.0 => factors.push(BurnoutFactor::LowEnergy),
        _ => {}
    }

    let average_mood = average_rating(check_ins, |c| c.mood);
    if matches!(average_mood, Some(m) if m <= 2.0) {
        factors.push(BurnoutFactor::LowMood);
    }

    let blocks = plan.map(|p| p.blocks()).unwrap_or_default();
    let load_minutes: i64 = blocks
        .iter()
        .filter(|b| b.kind.is_load())
        .map(|b| b.minutes())
        .sum();
    let load_ratio = load_minutes as f64 / work_window.minutes().max(1) as f64;
    if load_ratio > 1.0 {
        factors.push(BurnoutFactor::Overloaded);
    } else if load_ratio > 0.85 {
        factors.push(BurnoutFactor::HeavyLoad);
    }

    if blocks.iter().any(|b| b.span.end() > work_window.end()) {
        factors.push(BurnoutFactor::AfterHoursWork);
    }

    if drift_minutes >= HIGH_DRIFT_MINUTES {
        factors.push(BurnoutFactor::HighDrift);
    }

    let points = factors.iter().map(BurnoutFactor::points).sum();
    BurnoutRisk {
        level: BurnoutLevel::from_points(points),
        points,
        factors,
        average_energy,
        average_mood,
        load_ratio,
    }
}
