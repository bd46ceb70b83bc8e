//! UserProfile aggregate.
//!
//! One profile per authenticated user. Scheduling, nudging and insights all
//! read their personal parameters (offset, work hours, focus length, tone)
//! from here.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use super::{CoachingTone, WorkHours};
use crate::domain::foundation::{DomainError, Timestamp, UserId, UtcOffset, ValidationError};

pub const MAX_DISPLAY_NAME_LENGTH: usize = 100;

pub const DEFAULT_FOCUS_BLOCK_MINUTES: u32 = 90;
pub const MIN_FOCUS_BLOCK_MINUTES: u32 = 25;
pub const MAX_FOCUS_BLOCK_MINUTES: u32 = 180;

pub const DEFAULT_BREAK_MINUTES: u32 = 15;
pub const MIN_BREAK_MINUTES: u32 = 5;
pub const MAX_BREAK_MINUTES: u32 = 30;

pub const DEFAULT_WEEKLY_FOCUS_GOAL_MINUTES: u32 = 600;
pub const MAX_WEEKLY_FOCUS_GOAL_MINUTES: u32 = 6000;

/// Partial update of a profile. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfilePatch {
    pub display_name: Option<String>,
    pub utc_offset_minutes: Option<i32>,
    pub work_start: Option<NaiveTime>,
    pub work_end: Option<NaiveTime>,
    pub focus_block_minutes: Option<u32>,
    pub break_minutes: Option<u32>,
    pub coaching_tone: Option<CoachingTone>,
    pub weekly_focus_goal_minutes: Option<u32>,
    pub nudges_enabled: Option<bool>,
}

impl ProfilePatch {
    pub fn is_empty(&self) -> bool {
        *self == ProfilePatch::default()
    }
}

/// Personal coaching preferences of one user.
///
/// # Invariants
///
/// - `display_name` is 1-100 characters after trimming
/// - `work_hours.start < work_hours.end`
/// - `focus_block_minutes` in 25..=180, `break_minutes` in 5..=30
/// - `weekly_focus_goal_minutes` in 0..=6000
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    user_id: UserId,
    display_name: String,
    utc_offset: UtcOffset,
    work_hours: WorkHours,
    focus_block_minutes: u32,
    break_minutes: u32,
    coaching_tone: CoachingTone,
    weekly_focus_goal_minutes: u32,
    nudges_enabled: bool,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl UserProfile {
    /// Creates a profile with default preferences.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the display name is empty or too long
    pub fn new(user_id: UserId, display_name: &str, now: Timestamp) -> Result<Self, DomainError> {
        let display_name = Self::validate_display_name(display_name)?;
        Ok(Self {
            user_id,
            display_name,
            utc_offset: UtcOffset::UTC,
            work_hours: WorkHours::default(),
            focus_block_minutes: DEFAULT_FOCUS_BLOCK_MINUTES,
            break_minutes: DEFAULT_BREAK_MINUTES,
            coaching_tone: CoachingTone::default(),
            weekly_focus_goal_minutes: DEFAULT_WEEKLY_FOCUS_GOAL_MINUTES,
            nudges_enabled: true,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute a profile from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        user_id: UserId,
        display_name: String,
        utc_offset: UtcOffset,
        work_hours: WorkHours,
        focus_block_minutes: u32,
        break_minutes: u32,
        coaching_tone: CoachingTone,
        weekly_focus_goal_minutes: u32,
        nudges_enabled: bool,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            user_id,
            display_name,
            utc_offset,
            work_hours,
            focus_block_minutes,
            break_minutes,
            coaching_tone,
            weekly_focus_goal_minutes,
            nudges_enabled,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn utc_offset(&self) -> UtcOffset {
        self.utc_offset
    }

    pub fn work_hours(&self) -> WorkHours {
        self.work_hours
    }

    pub fn focus_block_minutes(&self) -> u32 {
        self.focus_block_minutes
    }

    pub fn break_minutes(&self) -> u32 {
        self.break_minutes
    }

    pub fn coaching_tone(&self) -> CoachingTone {
        self.coaching_tone
    }

    pub fn weekly_focus_goal_minutes(&self) -> u32 {
        self.weekly_focus_goal_minutes
    }

    pub fn nudges_enabled(&self) -> bool {
        self.nudges_enabled
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Applies a partial update atomically: either every field is valid and
    /// the whole patch lands, or the profile is left unchanged.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` naming the first invalid field
    pub fn apply(&mut self, patch: ProfilePatch, now: Timestamp) -> Result<(), DomainError> {
        let mut next = self.clone();

        if let Some(name) = patch.display_name {
            next.display_name = Self::validate_display_name(&name)?;
        }
        if let Some(minutes) = patch.utc_offset_minutes {
            next.utc_offset = UtcOffset::from_minutes(minutes)?;
        }
        if patch.work_start.is_some() || patch.work_end.is_some() {
            let start = patch.work_start.unwrap_or(next.work_hours.start());
            let end = patch.work_end.unwrap_or(next.work_hours.end());
            next.work_hours = WorkHours::new(start, end)?;
        }
        if let Some(minutes) = patch.focus_block_minutes {
            next.focus_block_minutes = validate_range(
                "focus_block_minutes",
                minutes,
                MIN_FOCUS_BLOCK_MINUTES,
                MAX_FOCUS_BLOCK_MINUTES,
            )?;
        }
        if let Some(minutes) = patch.break_minutes {
            next.break_minutes =
                validate_range("break_minutes", minutes, MIN_BREAK_MINUTES, MAX_BREAK_MINUTES)?;
        }
        if let Some(tone) = patch.coaching_tone {
            next.coaching_tone = tone;
        }
        if let Some(minutes) = patch.weekly_focus_goal_minutes {
            next.weekly_focus_goal_minutes = validate_range(
                "weekly_focus_goal_minutes",
                minutes,
                0,
                MAX_WEEKLY_FOCUS_GOAL_MINUTES,
            )?;
        }
        if let Some(enabled) = patch.nudges_enabled {
            next.nudges_enabled = enabled;
        }

        next.updated_at = now;
        *self = next;
        Ok(())
    }

    fn validate_display_name(name: &str) -> Result<String, DomainError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("display_name").into());
        }
        if trimmed.chars().count() > MAX_DISPLAY_NAME_LENGTH {
            return Err(DomainError::validation(
                "display_name",
                format!(
                    "Display name must be {} characters or less",
                    MAX_DISPLAY_NAME_LENGTH
                ),
            ));
        }
        Ok(trimmed.to_string())
    }
}

fn validate_range(field: &str, value: u32, min: u32, max: u32) -> Result<u32, ValidationError> {
    if value < min || value > max {
        return Err(ValidationError::out_of_range(
            field,
            min as i32,
            max as i32,
            value.min(i32::MAX as u32) as i32,
        ));
    }
    Ok(value)
}
