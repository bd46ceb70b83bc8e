//! HTTP routes for rewards and insights.

use axum::{routing::get, Router};

use super::handlers::{daily_insights, list_badges, weekly_score, RewardHandlers};

/// Rewards router, nested under `/api/rewards`.
pub fn reward_routes(handlers: RewardHandlers) -> Router {
    Router::new()
        .route("/weekly/:date", get(weekly_score))
        .route("/badges", get(list_badges))
        .with_state(handlers)
}

/// Insights router, nested under `/api/insights`.
pub fn insight_routes(handlers: RewardHandlers) -> Router {
    Router::new()
        .route("/:date", get(daily_insights))
        .with_state(handlers)
}
