//! Prompt assembly for plan and nudge generation.

use std::fmt::Write as _;

use chrono::NaiveDate;

use crate::domain::calendar::{CalendarEvent, ExternalTask};
use crate::domain::foundation::{TimeSpan, UtcOffset};
use crate::domain::profile::{format_clock_time, CoachingTone};
use crate::domain::signals::{DriftReport, NudgeLevel, MAX_NUDGE_MESSAGE_LENGTH};

const PLAN_CONTRACT: &str = r#"Respond with JSON only, no prose:
{"summary": string, "blocks": [{"title": string, "kind": "focus"|"task"|"meeting"|"break"|"buffer", "start": "HH:MM", "end": "HH:MM", "task_id": string (optional)}]}
Times are local. Blocks must not overlap and must keep every meeting unchanged."#;

/// Everything the model sees when planning one day.
#[derive(Debug, Clone, Copy)]
pub struct PlanPromptInput<'a> {
    pub display_name: &'a str,
    pub date: NaiveDate,
    pub utc_offset: UtcOffset,
    pub window: TimeSpan,
    pub focus_block_minutes: u32,
    pub break_minutes: u32,
    pub default_task_minutes: u32,
    pub events: &'a [CalendarEvent],
    pub tasks: &'a [ExternalTask],
    /// Mean energy rating over the last 7 days, if any check-ins exist.
    pub energy_average: Option<f64>,
}

/// Everything the model sees when writing a nudge.
#[derive(Debug, Clone, Copy)]
pub struct NudgePromptInput<'a> {
    pub display_name: &'a str,
    pub level: NudgeLevel,
    pub utc_offset: UtcOffset,
    pub drift: &'a DriftReport,
    /// Title of the block the user drifted from.
    pub block_title: Option<&'a str>,
}

pub fn system_prompt(tone: CoachingTone) -> String {
    format!(
        "You are Omni, a personal productivity coach. Your voice is {}. \
         You protect deep work, respect meetings, and keep advice short.",
        tone.persona()
    )
}

pub fn plan_prompt(input: &PlanPromptInput<'_>) -> String {
    let local = |span: &TimeSpan| {
        format!(
            "{}-{}",
            format_clock_time(input.utc_offset.local_time(&span.start())),
            format_clock_time(input.utc_offset.local_time(&span.end()))
        )
    };

    let mut prompt = String::new();
    let _ = writeln!(prompt, "Plan {} for {}.", input.date.format("%A %Y-%m-%d"), input.display_name);
    let _ = writeln!(prompt, "Work window: {}", local(&input.window));
    let _ = writeln!(
        prompt,
        "Focus blocks up to {} minutes with {}-minute breaks between them.",
        input.focus_block_minutes, input.break_minutes
    );
    match input.energy_average {
        Some(avg) => {
            let _ = writeln!(prompt, "Recent energy: {:.1}/5.", avg);
        }
        None => {
            let _ = writeln!(prompt, "Recent energy: unknown.");
        }
    }

    let meetings: Vec<&CalendarEvent> = input.events.iter().filter(|e| !e.all_day).collect();
    prompt.push_str("\nMeetings:\n");
    if meetings.is_empty() {
        prompt.push_str("- none\n");
    }
    for event in meetings {
        let _ = writeln!(prompt, "- {} {}", local(&event.span), event.title);
    }

    let open: Vec<&ExternalTask> = input.tasks.iter().filter(|t| !t.completed).collect();
    prompt.push_str("\nOpen tasks:\n");
    if open.is_empty() {
        prompt.push_str("- none\n");
    }
    for task in open {
        let _ = write!(
            prompt,
            "- [{}] {} ({} min, {} priority",
            task.external_id,
            task.title,
            task.effective_estimate(input.default_task_minutes),
            task.priority.as_str()
        );
        if let Some(due) = task.due {
            let _ = write!(prompt, ", due {}", input.utc_offset.local_date(due.as_datetime()));
        }
        prompt.push_str(")\n");
    }

    prompt.push('\n');
    prompt.push_str(PLAN_CONTRACT);
    prompt
}

pub fn nudge_prompt(input: &NudgePromptInput<'_>) -> String {
    let drift = input.drift;
    let mut prompt = format!(
        "{} just lost {} minutes to {} starting at {}.",
        input.display_name,
        drift.minutes,
        drift.trigger.phrase(),
        format_clock_time(input.utc_offset.local_time(drift.started_at.as_datetime()))
    );
    if let Some(title) = input.block_title {
        let _ = write!(prompt, " They were supposed to be on \"{}\".", title);
    }
    let _ = write!(
        prompt,
        "\nWrite a {} nudge ({}) that gets them back on track.\n\
         Respond with JSON only: {{\"message\": string}} of at most {} characters.",
        input.level.as_str(),
        level_guidance(input.level),
        MAX_NUDGE_MESSAGE_LENGTH
    );
    prompt
}

fn level_guidance(level: NudgeLevel) -> &'static str {
    match level {
        NudgeLevel::Gentle => "a light reminder",
        NudgeLevel::Firm => "name the pattern and suggest one concrete step",
        NudgeLevel::Reset => "suggest a short reset: stand up, breathe, then restart with a small task",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Timestamp, UserId};
    use crate::domain::signals::DriftTrigger;
    use chrono::{NaiveTime, TimeZone, Utc};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 6).unwrap()
    }

    fn utc(h: u32, m: u32) -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 6, h, m, 0).unwrap()
    }

    #[test]
    fn system_prompt_carries_tone() {
        assert!(system_prompt(CoachingTone::Direct).contains("candid"));
        assert!(system_prompt(CoachingTone::Playful).contains("witty"));
    }

    #[test]
    fn plan_prompt_lists_window_meetings_tasks_and_contract() {
        let offset = UtcOffset::from_minutes(60).unwrap();
        let window = TimeSpan::new(
            offset.to_utc(date(), NaiveTime::from_hms_opt(9, 0, 0).unwrap()),
            offset.to_utc(date(), NaiveTime::from_hms_opt(17, 0, 0).unwrap()),
        )
        .unwrap();
        let events = vec![
            CalendarEvent::timed("e-1", "Standup", TimeSpan::new(utc(8, 0), utc(8, 15)).unwrap()),
            CalendarEvent {
                external_id: "e-2".into(),
                title: "Holiday".into(),
                span: TimeSpan::new(utc(0, 0), utc(23, 0)).unwrap(),
                all_day: true,
            },
        ];
        let tasks = vec![
            ExternalTask::from_provider("t-1", "Write report [45m] !high", None, None, false),
            ExternalTask::from_provider("t-2", "Done already", None, None, true),
        ];

        let prompt = plan_prompt(&PlanPromptInput {
            display_name: "Ada",
            date: date(),
            utc_offset: offset,
            window,
            focus_block_minutes: 90,
            break_minutes: 15,
            default_task_minutes: 30,
            events: &events,
            tasks: &tasks,
            energy_average: Some(3.5),
        });

        assert!(prompt.contains("Work window: 09:00-17:00"));
        assert!(prompt.contains("- 09:00-09:15 Standup"));
        assert!(!prompt.contains("Holiday"));
        assert!(prompt.contains("- [t-1] Write report (45 min, high priority)"));
        assert!(!prompt.contains("Done already"));
        assert!(prompt.contains("Recent energy: 3.5/5."));
        assert!(prompt.contains("\"task_id\""));
    }

    #[test]
    fn nudge_prompt_describes_drift_and_level() {
        let user = UserId::new("u-1").unwrap();
        let started = Timestamp::from_datetime(utc(14, 5));
        let drift = DriftReport::new(
            user,
            started,
            20,
            DriftTrigger::Video,
            None,
            None,
            started.plus_minutes(20),
        )
        .unwrap();

        let prompt = nudge_prompt(&NudgePromptInput {
            display_name: "Ada",
            level: NudgeLevel::Firm,
            utc_offset: UtcOffset::UTC,
            drift: &drift,
            block_title: Some("Deep work"),
        });

        assert!(prompt.contains("20 minutes to videos starting at 14:05"));
        assert!(prompt.contains("\"Deep work\""));
        assert!(prompt.contains("firm nudge"));
        assert!(prompt.contains("280 characters"));
    }
}
