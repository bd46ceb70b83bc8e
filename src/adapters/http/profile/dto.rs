//! Request and response bodies for the profile endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, ValidationError};
use crate::domain::profile::{
    format_clock_time, parse_clock_time, CoachingTone, ProfilePatch, UserProfile,
};

/// Preference fields accepted on create and update. Absent fields are left alone.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileSettingsRequest {
    pub utc_offset_minutes: Option<i32>,
    /// `HH:MM`
    pub work_start: Option<String>,
    /// `HH:MM`
    pub work_end: Option<String>,
    pub focus_block_minutes: Option<u32>,
    pub break_minutes: Option<u32>,
    pub coaching_tone: Option<CoachingTone>,
    pub weekly_focus_goal_minutes: Option<u32>,
    pub nudges_enabled: Option<bool>,
}

impl ProfileSettingsRequest {
    pub fn into_patch(self, display_name: Option<String>) -> Result<ProfilePatch, ValidationError> {
        let work_start = self
            .work_start
            .map(|raw| parse_clock_time("work_start", &raw))
            .transpose()?;
        let work_end = self
            .work_end
            .map(|raw| parse_clock_time("work_end", &raw))
            .transpose()?;

        Ok(ProfilePatch {
            display_name,
            utc_offset_minutes: self.utc_offset_minutes,
            work_start,
            work_end,
            focus_block_minutes: self.focus_block_minutes,
            break_minutes: self.break_minutes,
            coaching_tone: self.coaching_tone,
            weekly_focus_goal_minutes: self.weekly_focus_goal_minutes,
            nudges_enabled: self.nudges_enabled,
        })
    }
}

/// POST /api/profile
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProfileRequest {
    pub display_name: String,
    #[serde(flatten)]
    pub settings: ProfileSettingsRequest,
}

/// PATCH /api/profile
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProfileRequest {
    pub display_name: Option<String>,
    #[serde(flatten)]
    pub settings: ProfileSettingsRequest,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub user_id: String,
    pub display_name: String,
    pub utc_offset_minutes: i32,
    pub work_start: String,
    pub work_end: String,
    pub focus_block_minutes: u32,
    pub break_minutes: u32,
    pub coaching_tone: CoachingTone,
    pub weekly_focus_goal_minutes: u32,
    pub nudges_enabled: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&UserProfile> for ProfileResponse {
    fn from(profile: &UserProfile) -> Self {
        let hours = profile.work_hours();
        Self {
            user_id: profile.user_id().to_string(),
            display_name: profile.display_name().to_string(),
            utc_offset_minutes: profile.utc_offset().minutes(),
            work_start: format_clock_time(hours.start()),
            work_end: format_clock_time(hours.end()),
            focus_block_minutes: profile.focus_block_minutes(),
            break_minutes: profile.break_minutes(),
            coaching_tone: profile.coaching_tone(),
            weekly_focus_goal_minutes: profile.weekly_focus_goal_minutes(),
            nudges_enabled: profile.nudges_enabled(),
            created_at: *profile.created_at(),
            updated_at: *profile.updated_at(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    #[test]
    fn flattened_settings_parse_into_patch() {
        let req: UpdateProfileRequest = serde_json::from_str(
            r#"{"display_name": "Grace", "work_start": "08:30", "coaching_tone": "playful"}"#,
        )
        .unwrap();

        let patch = req.settings.into_patch(req.display_name).unwrap();

        assert_eq!(patch.display_name.as_deref(), Some("Grace"));
        assert_eq!(patch.work_start, NaiveTime::from_hms_opt(8, 30, 0));
        assert_eq!(patch.coaching_tone, Some(CoachingTone::Playful));
        assert_eq!(patch.work_end, None);
    }

    #[test]
    fn malformed_clock_time_names_the_field() {
        let settings = ProfileSettingsRequest {
            work_end: Some("5pm".to_string()),
            ..Default::default()
        };
        assert_eq!(settings.into_patch(None).unwrap_err().field(), "work_end");
    }

    #[test]
    fn empty_update_is_an_empty_patch() {
        let req: UpdateProfileRequest = serde_json::from_str("{}").unwrap();
        assert!(req.settings.into_patch(req.display_name).unwrap().is_empty());
    }
}
