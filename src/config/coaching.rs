//! Coaching behaviour tunables

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::profile::MIN_FOCUS_BLOCK_MINUTES;
use crate::domain::signals::NudgePolicy;

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct CoachingConfig {
    /// Minimum minutes between two nudges
    #[serde(default = "default_cooldown")]
    pub nudge_cooldown_minutes: i64,

    /// Trailing window in which drift reports escalate the nudge level
    #[serde(default = "default_escalation_window")]
    pub drift_escalation_window_minutes: i64,

    /// Estimate for tasks without a duration tag
    #[serde(default = "default_task_minutes")]
    pub default_task_minutes: u32,

    /// Shortest gap turned into a deep-work block; at most the shortest
    /// focus length a profile may choose
    #[serde(default = "default_min_focus_block")]
    pub min_focus_block_minutes: i64,
}

impl CoachingConfig {
    pub fn nudge_policy(&self) -> NudgePolicy {
        NudgePolicy::new(self.nudge_cooldown_minutes, self.drift_escalation_window_minutes)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.nudge_cooldown_minutes < 0 {
            return Err(ValidationError::InvalidCoaching("nudge_cooldown_minutes"));
        }
        if self.drift_escalation_window_minutes <= 0 {
            return Err(ValidationError::InvalidCoaching("drift_escalation_window_minutes"));
        }
        if !(5..=480).contains(&self.default_task_minutes) {
            return Err(ValidationError::InvalidCoaching("default_task_minutes"));
        }
        if !(5..=MIN_FOCUS_BLOCK_MINUTES as i64).contains(&self.min_focus_block_minutes) {
            return Err(ValidationError::InvalidCoaching("min_focus_block_minutes"));
        }
        Ok(())
    }
}

impl Default for CoachingConfig {
    fn default() -> Self {
        Self {
            nudge_cooldown_minutes: default_cooldown(),
            drift_escalation_window_minutes: default_escalation_window(),
            default_task_minutes: default_task_minutes(),
            min_focus_block_minutes: default_min_focus_block(),
        }
    }
}

fn default_cooldown() -> i64 {
    10
}

fn default_escalation_window() -> i64 {
    120
}

fn default_task_minutes() -> u32 {
    30
}

fn default_min_focus_block() -> i64 {
    25
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_policy_defaults() {
        let config = CoachingConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.nudge_policy(), NudgePolicy::default());
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        let config = CoachingConfig {
            default_task_minutes: 0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidCoaching("default_task_minutes"))
        );

        let config = CoachingConfig {
            drift_escalation_window_minutes: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_min_focus_block_cannot_exceed_shortest_profile_focus() {
        let at_limit = CoachingConfig {
            min_focus_block_minutes: 25,
            ..Default::default()
        };
        assert!(at_limit.validate().is_ok());

        let above = CoachingConfig {
            min_focus_block_minutes: 26,
            ..Default::default()
        };
        assert_eq!(
            above.validate(),
            Err(ValidationError::InvalidCoaching("min_focus_block_minutes"))
        );
    }
}
