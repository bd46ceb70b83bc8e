//! HTTP adapter for daily plan endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{BlockResponse, PlanResponse, UpdateBlockStatusRequest};
pub use handlers::PlanHandlers;
pub use routes::plan_routes;
