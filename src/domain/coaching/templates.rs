//! Deterministic texts used when the model is not available.

use crate::domain::plan::{BlockKind, ScheduleOutcome};
use crate::domain::profile::CoachingTone;
use crate::domain::signals::{DriftReport, NudgeLevel};

/// Block titles longer than this are shortened in nudges.
const MAX_TITLE_CHARS: usize = 60;

/// Nudge message for `level`, written in `tone`.
pub fn template_nudge(
    level: NudgeLevel,
    tone: CoachingTone,
    drift: &DriftReport,
    block_title: Option<&str>,
) -> String {
    let target = block_title.map(shorten).unwrap_or_else(|| "your plan".to_string());
    let trigger = drift.trigger.phrase();

    match (level, tone) {
        (NudgeLevel::Gentle, CoachingTone::Gentle) => {
            format!("No worries about the {} with {}. Ease back into {} when you're ready.", minutes(drift), trigger, target)
        }
        (NudgeLevel::Gentle, CoachingTone::Direct) => {
            format!("{} lost to {}. Back to {} now.", capitalized_minutes(drift), trigger, target)
        }
        (NudgeLevel::Gentle, CoachingTone::Playful) => {
            format!("{} called, {} is waiting. Let's get back to it!", capitalize(trigger), target)
        }
        (NudgeLevel::Firm, CoachingTone::Gentle) => {
            format!("{} keeps pulling you away. Try closing it for the next block and return to {}.", capitalize(trigger), target)
        }
        (NudgeLevel::Firm, CoachingTone::Direct) => {
            format!("Second drift in a short while. Shut off {} and restart {} with a 10-minute sprint.", trigger, target)
        }
        (NudgeLevel::Firm, CoachingTone::Playful) => {
            format!("Plot twist: {} is winning today. Time to stage a comeback with {}.", trigger, target)
        }
        (NudgeLevel::Reset, CoachingTone::Gentle) => {
            "Let's reset. Stand up, take a few slow breaths, then start with the smallest next step.".to_string()
        }
        (NudgeLevel::Reset, CoachingTone::Direct) => {
            "Reset now: step away for 5 minutes, then restart with one small task.".to_string()
        }
        (NudgeLevel::Reset, CoachingTone::Playful) => {
            "Brain reboot time! Stretch, grab some water, then pick one tiny task and crush it.".to_string()
        }
    }
}

/// One-line summary of a deterministic schedule.
pub fn fallback_summary(outcome: &ScheduleOutcome) -> String {
    let count = |kind: BlockKind| outcome.blocks.iter().filter(|b| b.kind == kind).count();
    let tasks = count(BlockKind::Task);
    let focus = count(BlockKind::Focus);
    let meetings = count(BlockKind::Meeting);

    let mut summary = format!(
        "{} scheduled, {} deep-work {} around {}.",
        plural(tasks, "task"),
        focus,
        if focus == 1 { "block" } else { "blocks" },
        plural(meetings, "meeting")
    );
    if !outcome.unscheduled.is_empty() {
        summary.push_str(&format!(
            " {} did not fit today.",
            plural(outcome.unscheduled.len(), "task")
        ));
    }
    summary
}

fn shorten(title: &str) -> String {
    if title.chars().count() <= MAX_TITLE_CHARS {
        return title.to_string();
    }
    let mut short: String = title.chars().take(MAX_TITLE_CHARS - 3).collect();
    short.push_str("...");
    short
}

fn minutes(drift: &DriftReport) -> String {
    plural(drift.minutes as usize, "minute")
}

fn capitalized_minutes(drift: &DriftReport) -> String {
    capitalize(&minutes(drift))
}

fn plural(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("1 {}", noun)
    } else {
        format!("{} {}s", n, noun)
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
