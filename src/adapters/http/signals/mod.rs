//! HTTP adapter for check-ins, drift reports and nudges.

mod dto;
mod handlers;
mod routes;

pub use dto::{CheckInRequest, DriftRequest};
pub use handlers::SignalHandlers;
pub use routes::signal_routes;
