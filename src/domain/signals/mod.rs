//! Signals domain module.
//!
//! Behavioral input from the user: check-ins (mood, energy, focus), drift
//! reports, and the nudges issued in response to drift.

mod check_in;
mod drift;
mod nudge;
mod policy;

pub use check_in::{average_rating, CheckIn, MAX_NOTE_LENGTH};
pub use drift::{DriftReport, DriftTrigger, MAX_DRIFT_MINUTES, MIN_DRIFT_MINUTES};
pub use nudge::{
    validate_message, Nudge, NudgeLevel, NudgeSource, MAX_NUDGE_MESSAGE_LENGTH,
};
pub use policy::{NudgeDecision, NudgePolicy, SuppressionReason, LONG_DRIFT_MINUTES};
