//! HTTP routes for profile endpoints.

use axum::{routing::get, Router};

use super::handlers::{create_profile, delete_profile, get_profile, update_profile, ProfileHandlers};

/// Profile router, nested under `/api/profile`.
pub fn profile_routes(handlers: ProfileHandlers) -> Router {
    Router::new()
        .route(
            "/",
            get(get_profile)
                .post(create_profile)
                .patch(update_profile)
                .delete(delete_profile),
        )
        .with_state(handlers)
}
