//! HTTP adapter for weekly scores, badges and daily insights.

mod dto;
mod handlers;
mod routes;

pub use dto::{BadgeResponse, BadgeSummary, WeeklyScoreResponse};
pub use handlers::RewardHandlers;
pub use routes::{insight_routes, reward_routes};
