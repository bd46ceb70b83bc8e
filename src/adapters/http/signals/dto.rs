//! Request bodies for the signal endpoints.
//!
//! Responses serialize the domain records directly.

use serde::Deserialize;

use crate::application::handlers::{RecordCheckInCommand, ReportDriftCommand};
use crate::domain::foundation::{BlockId, Timestamp};
use crate::domain::signals::DriftTrigger;

/// POST /api/signals/check-ins
#[derive(Debug, Clone, Deserialize)]
pub struct CheckInRequest {
    pub mood: u8,
    pub energy: u8,
    pub focus: u8,
    #[serde(default)]
    pub note: Option<String>,
}

impl From<CheckInRequest> for RecordCheckInCommand {
    fn from(req: CheckInRequest) -> Self {
        Self {
            mood: req.mood,
            energy: req.energy,
            focus: req.focus,
            note: req.note,
        }
    }
}

/// POST /api/signals/drift
#[derive(Debug, Clone, Deserialize)]
pub struct DriftRequest {
    #[serde(default)]
    pub started_at: Option<Timestamp>,
    pub minutes: u32,
    pub trigger: DriftTrigger,
    #[serde(default)]
    pub block_id: Option<BlockId>,
    #[serde(default)]
    pub note: Option<String>,
}

impl From<DriftRequest> for ReportDriftCommand {
    fn from(req: DriftRequest) -> Self {
        Self {
            started_at: req.started_at,
            minutes: req.minutes,
            trigger: req.trigger,
            block_id: req.block_id,
            note: req.note,
        }
    }
}
