//! HTTP routes for daily plan endpoints.

use axum::{
    routing::{get, patch, post},
    Router,
};

use super::handlers::{generate_plan, get_plan, update_block_status, PlanHandlers};

/// Plan router, nested under `/api/plans`.
pub fn plan_routes(handlers: PlanHandlers) -> Router {
    Router::new()
        .route("/:date", get(get_plan))
        .route("/:date/generate", post(generate_plan))
        .route("/:date/blocks/:block_id", patch(update_block_status))
        .with_state(handlers)
}
