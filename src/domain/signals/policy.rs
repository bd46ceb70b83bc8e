//! Nudge escalation policy.
//!
//! Pure decision over the user's recent drift reports and nudges. The caller
//! loads the recent history; the policy decides whether to nudge and how hard.

use serde::{Deserialize, Serialize};

use super::{DriftReport, Nudge, NudgeLevel};

/// A single drift at least this long always escalates to Reset.
pub const LONG_DRIFT_MINUTES: u32 = 45;

/// Why no nudge was sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuppressionReason {
    /// The user turned nudges off.
    Disabled,
    /// A nudge was already sent within the cooldown.
    Cooldown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NudgeDecision {
    Send(NudgeLevel),
    Suppressed(SuppressionReason),
}

/// Cooldown and escalation parameters, in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NudgePolicy {
    pub cooldown_minutes: i64,
    pub escalation_window_minutes: i64,
}

impl Default for NudgePolicy {
    fn default() -> Self {
        Self {
            cooldown_minutes: 10,
            escalation_window_minutes: 120,
        }
    }
}

impl NudgePolicy {
    pub fn new(cooldown_minutes: i64, escalation_window_minutes: i64) -> Self {
        Self {
            cooldown_minutes,
            escalation_window_minutes,
        }
    }

    /// Decides how to respond to `report`.
    ///
    /// `recent_drifts` and `recent_nudges` are the user's history; entries
    /// outside the relevant windows are ignored, and `report` itself may or
    /// may not be among `recent_drifts`.
    pub fn decide(
        &self,
        nudges_enabled: bool,
        report: &DriftReport,
        recent_drifts: &[DriftReport],
        recent_nudges: &[Nudge],
    ) -> NudgeDecision {
        if !nudges_enabled {
            return NudgeDecision::Suppressed(SuppressionReason::Disabled);
        }

        let now = report.reported_at;
        let cooldown_start = now.minus_minutes(self.cooldown_minutes);
        let in_cooldown = recent_nudges
            .iter()
            .any(|n| !n.created_at.is_before(&cooldown_start) && !n.created_at.is_after(&now));
        if in_cooldown {
            return NudgeDecision::Suppressed(SuppressionReason::Cooldown);
        }

        if report.minutes >= LONG_DRIFT_MINUTES {
            return NudgeDecision::Send(NudgeLevel::Reset);
        }

        let window_start = now.minus_minutes(self.escalation_window_minutes);
        let earlier = recent_drifts
            .iter()
            .filter(|d| d.id != report.id)
            .filter(|d| !d.started_at.is_before(&window_start) && !d.started_at.is_after(&now))
            .count();

        NudgeDecision::Send(match earlier + 1 {
            1 => NudgeLevel::Gentle,
            2 => NudgeLevel::Firm,
            _ => NudgeLevel::Reset,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{DriftReportId, Timestamp, UserId};
    use crate::domain::signals::{DriftTrigger, NudgeSource};

    fn base() -> Timestamp {
        Timestamp::from_unix_secs(1_714_982_400)
    }

    fn drift(started_minutes_ago: i64, minutes: u32) -> DriftReport {
        DriftReport::new(
            UserId::new("u").unwrap(),
            base().minus_minutes(started_minutes_ago),
            minutes,
            DriftTrigger::SocialMedia,
            None,
            None,
            base(),
        )
        .unwrap()
    }

    fn nudge(created_minutes_ago: i64) -> Nudge {
        Nudge::new(
            UserId::new("u").unwrap(),
            DriftReportId::new(),
            NudgeLevel::Gentle,
            "Refocus",
            NudgeSource::Template,
            base().minus_minutes(created_minutes_ago),
        )
        .unwrap()
    }

    #[test]
    fn disabled_nudges_are_suppressed() {
        let decision = NudgePolicy::default().decide(false, &drift(5, 5), &[], &[]);
        assert_eq!(decision, NudgeDecision::Suppressed(SuppressionReason::Disabled));
    }

    #[test]
    fn first_drift_is_gentle() {
        let report = drift(5, 5);
        let decision = NudgePolicy::default().decide(true, &report, &[report.clone()], &[]);
        assert_eq!(decision, NudgeDecision::Send(NudgeLevel::Gentle));
    }

    #[test]
    fn escalates_with_drifts_in_window() {
        let policy = NudgePolicy::default();
        let report = drift(5, 5);

        let one_earlier = vec![drift(60, 10)];
        assert_eq!(
            policy.decide(true, &report, &one_earlier, &[]),
            NudgeDecision::Send(NudgeLevel::Firm)
        );

        let two_earlier = vec![drift(60, 10), drift(100, 10)];
        assert_eq!(
            policy.decide(true, &report, &two_earlier, &[]),
            NudgeDecision::Send(NudgeLevel::Reset)
        );
    }

    #[test]
    fn drifts_outside_window_do_not_escalate() {
        let report = drift(5, 5);
        let old = vec![drift(121, 10), drift(300, 10)];
        assert_eq!(
            NudgePolicy::default().decide(true, &report, &old, &[]),
            NudgeDecision::Send(NudgeLevel::Gentle)
        );
    }

    #[test]
    fn long_single_drift_is_reset() {
        assert_eq!(
            NudgePolicy::default().decide(true, &drift(50, 45), &[], &[]),
            NudgeDecision::Send(NudgeLevel::Reset)
        );
        assert_eq!(
            NudgePolicy::default().decide(true, &drift(50, 44), &[], &[]),
            NudgeDecision::Send(NudgeLevel::Gentle)
        );
    }

    #[test]
    fn recent_nudge_triggers_cooldown() {
        let policy = NudgePolicy::default();
        let report = drift(5, 50);

        assert_eq!(
            policy.decide(true, &report, &[], &[nudge(10)]),
            NudgeDecision::Suppressed(SuppressionReason::Cooldown)
        );
        assert_eq!(
            policy.decide(true, &report, &[], &[nudge(11)]),
            NudgeDecision::Send(NudgeLevel::Reset)
        );
    }
}
