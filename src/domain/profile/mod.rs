//! Profile domain module.
//!
//! Holds the per-user coaching preferences that every other module reads:
//! UTC offset, work hours, focus/break lengths, coaching tone and nudge opt-in.

mod aggregate;
mod values;

pub use aggregate::{
    ProfilePatch, UserProfile, DEFAULT_BREAK_MINUTES, DEFAULT_FOCUS_BLOCK_MINUTES,
    DEFAULT_WEEKLY_FOCUS_GOAL_MINUTES, MAX_DISPLAY_NAME_LENGTH,
    MIN_FOCUS_BLOCK_MINUTES,
};
pub use values::{format_clock_time, parse_clock_time, CoachingTone, WorkHours};
