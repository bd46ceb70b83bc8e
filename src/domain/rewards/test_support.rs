//! Fixtures shared by the scoring engine tests.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

use super::{WeekActivity, WeekRange};
use crate::domain::foundation::{
    DriftReportId, Rating, TimeSpan, Timestamp, UserId, UtcOffset,
};
use crate::domain::plan::{BlockKind, BlockStatus, DailyPlan, PlanSource, ScheduleBlock};
use crate::domain::signals::{CheckIn, DriftReport, DriftTrigger, Nudge, NudgeLevel, NudgeSource};

pub fn user() -> UserId {
    UserId::new("user-1").unwrap()
}

/// 2024-05-06, a Monday.
pub fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 6).unwrap()
}

pub fn day(offset: i64) -> NaiveDate {
    monday() + Duration::days(offset)
}

pub fn at(date: NaiveDate, hour: u32, minute: u32) -> DateTime<Utc> {
    date.and_time(NaiveTime::from_hms_opt(hour, minute, 0).unwrap()).and_utc()
}

pub fn monday_noon() -> Timestamp {
    Timestamp::from_datetime(at(monday(), 12, 0))
}

pub fn block_at(
    date: NaiveDate,
    kind: BlockKind,
    hour: u32,
    minute: u32,
    minutes: i64,
    status: BlockStatus,
) -> ScheduleBlock {
    let span = TimeSpan::starting_at(at(date, hour, minute), minutes).unwrap();
    let mut block = ScheduleBlock::new(kind, format!("{} {}", kind, hour), span);
    block.status = status;
    if status == BlockStatus::Completed {
        block.completed_at = Some(Timestamp::from_datetime(span.end()));
    }
    block
}

pub fn plan_on(date: NaiveDate, blocks: Vec<ScheduleBlock>) -> DailyPlan {
    DailyPlan::new(
        user(),
        date,
        blocks,
        PlanSource::Fallback,
        "",
        vec![],
        Timestamp::from_datetime(at(date, 7, 0)),
    )
    .unwrap()
}

pub fn check_in_on(date: NaiveDate, mood: u8, energy: u8) -> CheckIn {
    CheckIn::new(
        user(),
        Timestamp::from_datetime(at(date, 12, 0)),
        Rating::new(mood).unwrap(),
        Rating::new(energy).unwrap(),
        Rating::new(3).unwrap(),
        None,
    )
    .unwrap()
}

pub fn drift_at(date: NaiveDate, hour: u32, minutes: u32, trigger: DriftTrigger) -> DriftReport {
    let started = Timestamp::from_datetime(at(date, hour, 0));
    DriftReport::new(user(), started, minutes, trigger, None, None, started.plus_minutes(minutes as i64))
        .unwrap()
}

pub fn nudge_on(date: NaiveDate, acknowledged: bool) -> Nudge {
    let created = Timestamp::from_datetime(at(date, 15, 0));
    let mut nudge = Nudge::new(
        user(),
        DriftReportId::new(),
        NudgeLevel::Gentle,
        "Back to it",
        NudgeSource::Template,
        created,
    )
    .unwrap();
    if acknowledged {
        nudge.acknowledge(created.plus_minutes(1));
    }
    nudge
}

pub fn activity<'a>(
    plans: &'a [DailyPlan],
    check_ins: &'a [CheckIn],
    drifts: &'a [DriftReport],
    nudges: &'a [Nudge],
) -> WeekActivity<'a> {
    WeekActivity {
        week: WeekRange::containing(monday()),
        utc_offset: UtcOffset::UTC,
        plans,
        check_ins,
        drifts,
        nudges,
    }
}
