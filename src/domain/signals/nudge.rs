//! Nudges: short coaching messages issued in response to drift.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, DriftReportId, NudgeId, Timestamp, UserId};

pub const MAX_NUDGE_MESSAGE_LENGTH: usize = 280;

/// Escalation level of a nudge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NudgeLevel {
    Gentle,
    Firm,
    Reset,
}

impl NudgeLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            NudgeLevel::Gentle => "gentle",
            NudgeLevel::Firm => "firm",
            NudgeLevel::Reset => "reset",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "gentle" => Some(NudgeLevel::Gentle),
            "firm" => Some(NudgeLevel::Firm),
            "reset" => Some(NudgeLevel::Reset),
            _ => None,
        }
    }
}

/// Who wrote the nudge text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NudgeSource {
    Ai,
    Template,
}

impl NudgeSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            NudgeSource::Ai => "ai",
            NudgeSource::Template => "template",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ai" => Some(NudgeSource::Ai),
            "template" => Some(NudgeSource::Template),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nudge {
    pub id: NudgeId,
    pub user_id: UserId,
    pub drift_report_id: DriftReportId,
    pub level: NudgeLevel,
    pub message: String,
    pub source: NudgeSource,
    pub created_at: Timestamp,
    pub acknowledged_at: Option<Timestamp>,
}

impl Nudge {
    /// # Errors
    ///
    /// - `ValidationFailed` if the message is empty or over 280 characters
    pub fn new(
        user_id: UserId,
        drift_report_id: DriftReportId,
        level: NudgeLevel,
        message: &str,
        source: NudgeSource,
        created_at: Timestamp,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            id: NudgeId::new(),
            user_id,
            drift_report_id,
            level,
            message: validate_message(message)?,
            source,
            created_at,
            acknowledged_at: None,
        })
    }

    pub fn is_acknowledged(&self) -> bool {
        self.acknowledged_at.is_some()
    }

    /// Acknowledges the nudge. Returns false if it was already acknowledged,
    /// in which case the original time is kept.
    pub fn acknowledge(&mut self, at: Timestamp) -> bool {
        if self.acknowledged_at.is_some() {
            return false;
        }
        self.acknowledged_at = Some(at);
        true
    }
}

/// Validates and trims nudge text.
pub fn validate_message(message: &str) -> Result<String, DomainError> {
    let trimmed = message.trim();
    let len = trimmed.chars().count();
    if len == 0 || len > MAX_NUDGE_MESSAGE_LENGTH {
        return Err(DomainError::validation(
            "message",
            format!(
                "Nudge message must be 1-{} characters, got {}",
                MAX_NUDGE_MESSAGE_LENGTH, len
            ),
        ));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nudge(message: &str) -> Result<Nudge, DomainError> {
        Nudge::new(
            UserId::new("u").unwrap(),
            DriftReportId::new(),
            NudgeLevel::Gentle,
            message,
            NudgeSource::Template,
            Timestamp::from_unix_secs(0),
        )
    }

    #[test]
    fn message_length_is_validated() {
        assert!(nudge("").is_err());
        assert!(nudge("   ").is_err());
        assert!(nudge(&"x".repeat(281)).is_err());
        assert!(nudge(&"x".repeat(280)).is_ok());
    }

    #[test]
    fn acknowledge_is_idempotent() {
        let mut n = nudge("Back to it").unwrap();
        let first = Timestamp::from_unix_secs(10);
        assert!(n.acknowledge(first));
        assert!(!n.acknowledge(Timestamp::from_unix_secs(20)));
        assert_eq!(n.acknowledged_at, Some(first));
    }

    #[test]
    fn levels_are_ordered_by_severity() {
        assert!(NudgeLevel::Gentle < NudgeLevel::Firm);
        assert!(NudgeLevel::Firm < NudgeLevel::Reset);
        assert_eq!(NudgeLevel::parse("reset"), Some(NudgeLevel::Reset));
    }
}
