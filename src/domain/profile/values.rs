//! Value objects owned by the user profile.

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{TimeSpan, UtcOffset, ValidationError};

/// Daily working window in local wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkHours {
    start: NaiveTime,
    end: NaiveTime,
}

impl WorkHours {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self, ValidationError> {
        if end <= start {
            return Err(ValidationError::invalid_format(
                "work_hours",
                format!(
                    "start {} must be before end {}",
                    start.format("%H:%M"),
                    end.format("%H:%M")
                ),
            ));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    pub fn minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// The working window of a local `date` as a UTC span.
    pub fn window(&self, date: NaiveDate, offset: UtcOffset) -> Result<TimeSpan, ValidationError> {
        TimeSpan::new(offset.to_utc(date, self.start), offset.to_utc(date, self.end))
    }
}

impl Default for WorkHours {
    fn default() -> Self {
        Self {
            start: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN),
            end: NaiveTime::from_hms_opt(17, 0, 0).unwrap_or(NaiveTime::MIN),
        }
    }
}

/// Parses a local `HH:MM` wall-clock time.
pub fn parse_clock_time(field: &str, value: &str) -> Result<NaiveTime, ValidationError> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map_err(|_| ValidationError::invalid_format(field, format!("expected HH:MM, got '{}'", value)))
}

/// Formats a wall-clock time as `HH:MM`.
pub fn format_clock_time(time: NaiveTime) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}

/// Voice the coach uses in generated plans and nudges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoachingTone {
    #[default]
    Gentle,
    Direct,
    Playful,
}

impl CoachingTone {
    pub fn as_str(&self) -> &'static str {
        match self {
            CoachingTone::Gentle => "gentle",
            CoachingTone::Direct => "direct",
            CoachingTone::Playful => "playful",
        }
    }

    /// One-line persona instruction for prompt assembly.
    pub fn persona(&self) -> &'static str {
        match self {
            CoachingTone::Gentle => "warm, encouraging and patient",
            CoachingTone::Direct => "concise, candid and action-oriented",
            CoachingTone::Playful => "upbeat, witty and light-hearted",
        }
    }
}

impl fmt::Display for CoachingTone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CoachingTone {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gentle" => Ok(CoachingTone::Gentle),
            "direct" => Ok(CoachingTone::Direct),
            "playful" => Ok(CoachingTone::Playful),
            other => Err(ValidationError::invalid_format(
                "coaching_tone",
                format!("unknown tone '{}'", other),
            )),
        }
    }
}
