//! Drift reports: self-reported lapses of attention.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::check_in::normalize_note;
use crate::domain::foundation::{
    BlockId, DomainError, DriftReportId, TimeSpan, Timestamp, UserId, ValidationError,
};

pub const MIN_DRIFT_MINUTES: u32 = 1;
pub const MAX_DRIFT_MINUTES: u32 = 480;

/// What pulled the user's attention away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriftTrigger {
    SocialMedia,
    Messaging,
    Email,
    News,
    Video,
    Fatigue,
    Other,
}

impl DriftTrigger {
    pub const ALL: [DriftTrigger; 7] = [
        DriftTrigger::SocialMedia,
        DriftTrigger::Messaging,
        DriftTrigger::Email,
        DriftTrigger::News,
        DriftTrigger::Video,
        DriftTrigger::Fatigue,
        DriftTrigger::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DriftTrigger::SocialMedia => "social_media",
            DriftTrigger::Messaging => "messaging",
            DriftTrigger::Email => "email",
            DriftTrigger::News => "news",
            DriftTrigger::Video => "video",
            DriftTrigger::Fatigue => "fatigue",
            DriftTrigger::Other => "other",
        }
    }

    /// Human phrase for prompts and templates.
    pub fn phrase(&self) -> &'static str {
        match self {
            DriftTrigger::SocialMedia => "social media",
            DriftTrigger::Messaging => "messages",
            DriftTrigger::Email => "email",
            DriftTrigger::News => "the news",
            DriftTrigger::Video => "videos",
            DriftTrigger::Fatigue => "fatigue",
            DriftTrigger::Other => "a distraction",
        }
    }
}

impl fmt::Display for DriftTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DriftTrigger {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DriftTrigger::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                ValidationError::invalid_format("trigger", format!("unknown trigger '{}'", s))
            })
    }
}

/// A reported stretch of lost focus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriftReport {
    pub id: DriftReportId,
    pub user_id: UserId,
    pub started_at: Timestamp,
    pub minutes: u32,
    pub trigger: DriftTrigger,
    /// Plan block the user was supposed to be working on.
    pub block_id: Option<BlockId>,
    pub note: Option<String>,
    pub reported_at: Timestamp,
}

impl DriftReport {
    /// # Errors
    ///
    /// - `ValidationFailed` if `minutes` is outside 1..=480 or the note is too long
    pub fn new(
        user_id: UserId,
        started_at: Timestamp,
        minutes: u32,
        trigger: DriftTrigger,
        block_id: Option<BlockId>,
        note: Option<String>,
        reported_at: Timestamp,
    ) -> Result<Self, DomainError> {
        if !(MIN_DRIFT_MINUTES..=MAX_DRIFT_MINUTES).contains(&minutes) {
            return Err(ValidationError::out_of_range(
                "minutes",
                MIN_DRIFT_MINUTES as i32,
                MAX_DRIFT_MINUTES as i32,
                minutes.min(i32::MAX as u32) as i32,
            )
            .into());
        }

        Ok(Self {
            id: DriftReportId::new(),
            user_id,
            started_at,
            minutes,
            trigger,
            block_id,
            note: normalize_note(note)?,
            reported_at,
        })
    }

    /// The interval `[started_at, started_at + minutes)`.
    pub fn span(&self) -> Option<TimeSpan> {
        TimeSpan::starting_at(*self.started_at.as_datetime(), self.minutes as i64).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;

    fn report(minutes: u32) -> Result<DriftReport, DomainError> {
        DriftReport::new(
            UserId::new("u").unwrap(),
            Timestamp::from_unix_secs(3_600),
            minutes,
            DriftTrigger::Email,
            None,
            None,
            Timestamp::from_unix_secs(7_200),
        )
    }

    #[test]
    fn minutes_bounds_are_inclusive() {
        assert!(report(1).is_ok());
        assert!(report(480).is_ok());
        assert_eq!(report(0).unwrap_err().code, ErrorCode::ValidationFailed);
        assert!(report(481).is_err());
    }

    #[test]
    fn span_covers_reported_minutes() {
        let span = report(25).unwrap().span().unwrap();
        assert_eq!(span.minutes(), 25);
        assert_eq!(span.start().timestamp(), 3_600);
    }

    #[test]
    fn trigger_parses_snake_case() {
        assert_eq!("social_media".parse::<DriftTrigger>().unwrap(), DriftTrigger::SocialMedia);
        assert!("tv".parse::<DriftTrigger>().is_err());
        for trigger in DriftTrigger::ALL {
            assert_eq!(trigger.as_str().parse::<DriftTrigger>().unwrap(), trigger);
        }
    }
}
