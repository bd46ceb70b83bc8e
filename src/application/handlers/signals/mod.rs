//! Check-in, drift and nudge handlers.

mod acknowledge_nudge;
mod list_signals;
mod record_check_in;
mod report_drift;

pub use acknowledge_nudge::{AcknowledgeNudgeCommand, AcknowledgeNudgeHandler};
pub use list_signals::{DailySignals, ListSignalsHandler, ListSignalsQuery};
pub use record_check_in::{RecordCheckInCommand, RecordCheckInHandler};
pub use report_drift::{ReportDriftCommand, ReportDriftHandler, ReportDriftResult};
