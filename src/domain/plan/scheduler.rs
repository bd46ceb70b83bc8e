//! Deterministic day scheduler.
//!
//! Builds a plan from the calendar and task list without a model. The same
//! inputs always produce the same blocks, so it doubles as the fallback when
//! the model is unavailable or returns something unusable.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use super::{BlockKind, ScheduleBlock, UnscheduledTask};
use crate::domain::calendar::{CalendarEvent, ExternalTask};
use crate::domain::foundation::{TimeSpan, Timestamp, UtcOffset, ValidationError};
use crate::domain::profile::WorkHours;

pub const DEEP_WORK_TITLE: &str = "Deep work";
pub const BREAK_TITLE: &str = "Break";

/// Rounding granularity for "start from now".
const NOW_ROUNDING_SECS: i64 = 5 * 60;

/// Everything the scheduler needs to lay out one day.
#[derive(Debug, Clone)]
pub struct SchedulingInput<'a> {
    pub date: NaiveDate,
    pub utc_offset: UtcOffset,
    pub work_hours: WorkHours,
    pub focus_block_minutes: i64,
    pub break_minutes: i64,
    pub default_task_minutes: u32,
    pub min_focus_block_minutes: i64,
    pub now: Timestamp,
    pub events: &'a [CalendarEvent],
    pub tasks: &'a [ExternalTask],
}

/// Result of a scheduling pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleOutcome {
    pub blocks: Vec<ScheduleBlock>,
    pub unscheduled: Vec<UnscheduledTask>,
}

/// Lays out meetings, tasks, breaks and deep-work blocks for `input.date`.
pub fn fallback_schedule(input: &SchedulingInput<'_>) -> Result<ScheduleOutcome, ValidationError> {
    let window = input.work_hours.window(input.date, input.utc_offset)?;
    let meetings = merge_meetings(input.events, &window);

    let earliest = if input.utc_offset.local_date(input.now.as_datetime()) == input.date {
        round_up(*input.now.as_datetime()).max(window.start())
    } else {
        window.start()
    };
    let gaps = free_gaps(&window, &meetings, earliest);

    let mut tasks: Vec<&ExternalTask> = input.tasks.iter().filter(|t| !t.completed).collect();
    tasks.sort_by(|a, b| a.schedule_order(b, input.default_task_minutes));
    let mut placed = vec![false; tasks.len()];

    let mut blocks: Vec<ScheduleBlock> = meetings
        .into_iter()
        .map(|m| ScheduleBlock::new(BlockKind::Meeting, m.title, m.span))
        .collect();

    for gap in gaps {
        let mut filler = GapFiller::new(gap, input);

        for (index, task) in tasks.iter().enumerate() {
            if placed[index] {
                continue;
            }
            let estimate = task.effective_estimate(input.default_task_minutes) as i64;
            if let Some(span) = filler.take(estimate) {
                blocks.push(
                    ScheduleBlock::new(BlockKind::Task, task.title.clone(), span)
                        .with_task_ref(task.external_id.clone()),
                );
                placed[index] = true;
                filler.after_work(&mut blocks);
            }
        }

        filler.fill_deep_work(&mut blocks);
    }

    let unscheduled = tasks
        .iter()
        .zip(placed.iter())
        .filter(|(_, placed)| !**placed)
        .map(|(task, _)| UnscheduledTask {
            task_id: task.external_id.clone(),
            title: task.title.clone(),
            estimate_minutes: task.effective_estimate(input.default_task_minutes),
        })
        .collect();

    blocks.sort_by_key(|b| b.span.start());
    Ok(ScheduleOutcome {
        blocks,
        unscheduled,
    })
}

/// A merged run of overlapping calendar events.
#[derive(Debug, Clone, PartialEq, Eq)]
struct MeetingRun {
    title: String,
    span: TimeSpan,
}

/// Clips timed events to the window and merges the ones that overlap.
fn merge_meetings(events: &[CalendarEvent], window: &TimeSpan) -> Vec<MeetingRun> {
    let mut clipped: Vec<(TimeSpan, &str)> = events
        .iter()
        .filter(|e| !e.all_day)
        .filter_map(|e| e.span.clip_to(window).map(|span| (span, e.title.as_str())))
        .collect();
    clipped.sort_by_key(|(span, _)| (span.start(), span.end()));

    let mut runs: Vec<(DateTime<Utc>, DateTime<Utc>, Vec<&str>)> = Vec::new();
    for (span, title) in clipped {
        match runs.last_mut() {
            Some((_, end, titles)) if span.start() < *end => {
                *end = (*end).max(span.end());
                titles.push(title);
            }
            _ => runs.push((span.start(), span.end(), vec![title])),
        }
    }

    runs.into_iter()
        .filter_map(|(start, end, titles)| {
            TimeSpan::new(start, end).ok().map(|span| MeetingRun {
                title: titles.join(" / "),
                span,
            })
        })
        .collect()
}

/// Window minus meetings, starting no earlier than `earliest`.
fn free_gaps(window: &TimeSpan, meetings: &[MeetingRun], earliest: DateTime<Utc>) -> Vec<TimeSpan> {
    let mut gaps = Vec::new();
    let mut cursor = earliest.max(window.start());

    for meeting in meetings {
        if meeting.span.start() > cursor {
            if let Ok(gap) = TimeSpan::new(cursor, meeting.span.start()) {
                gaps.push(gap);
            }
        }
        cursor = cursor.max(meeting.span.end());
    }
    if let Ok(gap) = TimeSpan::new(cursor, window.end()) {
        gaps.push(gap);
    }
    gaps
}

fn round_up(instant: DateTime<Utc>) -> DateTime<Utc> {
    let secs = instant.timestamp();
    let rem = secs.rem_euclid(NOW_ROUNDING_SECS);
    let has_fraction = instant.timestamp_subsec_nanos() > 0;
    let base = instant - Duration::nanoseconds(instant.timestamp_subsec_nanos() as i64);
    if rem == 0 && !has_fraction {
        base
    } else {
        base + Duration::seconds(NOW_ROUNDING_SECS - rem)
    }
}

/// Cursor over one free gap, tracking continuous work since the last rest.
struct GapFiller {
    cursor: DateTime<Utc>,
    end: DateTime<Utc>,
    continuous: i64,
    focus: i64,
    rest: i64,
    min_focus: i64,
}

impl GapFiller {
    fn new(gap: TimeSpan, input: &SchedulingInput<'_>) -> Self {
        Self {
            cursor: gap.start(),
            end: gap.end(),
            continuous: 0,
            focus: input.focus_block_minutes,
            rest: input.break_minutes,
            min_focus: input.min_focus_block_minutes,
        }
    }

    fn remaining(&self) -> i64 {
        (self.end - self.cursor).num_minutes()
    }

    /// Reserves `minutes` of work if they fit.
    fn take(&mut self, minutes: i64) -> Option<TimeSpan> {
        if minutes <= 0 || minutes > self.remaining() {
            return None;
        }
        let span = TimeSpan::starting_at(self.cursor, minutes).ok()?;
        self.cursor = span.end();
        self.continuous += minutes;
        Some(span)
    }

    /// Inserts a break once continuous work reaches the focus length. A break
    /// that does not fit is left out; shorter tasks may still follow.
    fn after_work(&mut self, blocks: &mut Vec<ScheduleBlock>) {
        if self.continuous >= self.focus {
            self.push_break(blocks);
        }
    }

    fn push_break(&mut self, blocks: &mut Vec<ScheduleBlock>) -> bool {
        if self.rest > self.remaining() {
            return false;
        }
        match TimeSpan::starting_at(self.cursor, self.rest) {
            Ok(span) => {
                blocks.push(ScheduleBlock::new(BlockKind::Break, BREAK_TITLE, span));
                self.cursor = span.end();
                self.continuous = 0;
                true
            }
            Err(_) => false,
        }
    }

    /// Turns the rest of the gap into capped deep-work blocks with breaks
    /// between them.
    fn fill_deep_work(&mut self, blocks: &mut Vec<ScheduleBlock>) {
        // A deep-work block is never shorter than the minimum worth scheduling.
        let cap = self.focus.max(self.min_focus);
        loop {
            let room = cap - self.continuous;
            if room < self.min_focus {
                // A break is only worth it if deep work still fits after it.
                if self.remaining() < self.rest + self.min_focus || !self.push_break(blocks) {
                    return;
                }
                continue;
            }

            let length = room.min(self.remaining());
            if length < self.min_focus {
                return;
            }
            match self.take(length) {
                Some(span) => blocks.push(ScheduleBlock::new(BlockKind::Focus, DEEP_WORK_TITLE, span)),
                None => return,
            }
        }
    }
}
