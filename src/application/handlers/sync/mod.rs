//! Google Calendar/Tasks sync handlers.

mod connect_calendar;
mod disconnect_calendar;
mod sync_day;

pub use connect_calendar::{ConnectCalendarCommand, ConnectCalendarHandler};
pub use disconnect_calendar::DisconnectCalendarHandler;
pub use sync_day::{SyncDayHandler, SyncDayQuery};
