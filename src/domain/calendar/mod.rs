//! Calendar domain module.
//!
//! Provider-neutral view of a user's calendar and task list, plus the
//! encrypted connection record used to reach them.

mod connection;
mod event;
mod task;

pub use connection::{CalendarConnection, EncryptedSecret, REFRESH_LEEWAY_SECS};
pub use event::{CalendarEvent, SyncSnapshot};
pub use task::{ExternalTask, TaskPriority};
