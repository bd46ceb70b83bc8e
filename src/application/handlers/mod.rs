//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations. Every
//! handler reads and writes only the data of the calling user.

pub mod plans;
pub mod profile;
pub mod rewards;
pub mod signals;
pub mod sync;

use chrono::NaiveDate;

use crate::domain::foundation::{DomainError, TimeSpan, UtcOffset};

pub use plans::{
    GeneratePlanCommand, GeneratePlanHandler, GetPlanHandler, GetPlanQuery,
    UpdateBlockStatusCommand, UpdateBlockStatusHandler,
};
pub use profile::{
    CreateProfileCommand, CreateProfileHandler, DeleteProfileHandler, GetProfileHandler,
    UpdateProfileCommand, UpdateProfileHandler,
};
pub use rewards::{
    ComputeWeeklyScoreHandler, ComputeWeeklyScoreQuery, GetDailyInsightsHandler,
    GetDailyInsightsQuery, ListBadgesHandler,
};
pub use signals::{
    AcknowledgeNudgeCommand, AcknowledgeNudgeHandler, DailySignals, ListSignalsHandler,
    ListSignalsQuery, RecordCheckInCommand, RecordCheckInHandler, ReportDriftCommand,
    ReportDriftHandler, ReportDriftResult,
};
pub use sync::{
    ConnectCalendarCommand, ConnectCalendarHandler, DisconnectCalendarHandler, SyncDayHandler,
    SyncDayQuery,
};

/// UTC span of a local calendar day.
pub(crate) fn local_day(offset: UtcOffset, date: NaiveDate) -> Result<TimeSpan, DomainError> {
    Ok(TimeSpan::starting_at(offset.start_of_day(date), 24 * 60)?)
}
