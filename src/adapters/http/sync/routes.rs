//! HTTP routes for Google sync.

use axum::{
    routing::{delete, post},
    Router,
};

use super::handlers::{connect, disconnect, sync_day, SyncHandlers};

/// Sync router, nested under `/api/sync/google`.
pub fn sync_routes(handlers: SyncHandlers) -> Router {
    Router::new()
        .route("/", delete(disconnect))
        .route("/connect", post(connect))
        .route("/:date", post(sync_day))
        .with_state(handlers)
}
