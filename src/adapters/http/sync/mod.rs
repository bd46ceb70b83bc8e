//! HTTP adapter for Google Calendar and Tasks sync.

mod dto;
mod handlers;
mod routes;

pub use dto::{ConnectRequest, ConnectionResponse};
pub use handlers::SyncHandlers;
pub use routes::sync_routes;
