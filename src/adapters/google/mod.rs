//! Google adapters.
//!
//! `GoogleCalendarProvider` implements `CalendarProvider` over the OAuth
//! token endpoint, Calendar v3 and Tasks v1.

mod client;
mod wire;

pub use client::{GoogleCalendarProvider, GoogleConfig};
