//! HTTP routes for signal endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    acknowledge_nudge, list_signals, record_check_in, report_drift, SignalHandlers,
};

/// Signal router, nested under `/api/signals`.
pub fn signal_routes(handlers: SignalHandlers) -> Router {
    Router::new()
        .route("/check-ins", post(record_check_in))
        .route("/drift", post(report_drift))
        .route("/nudges/:id/ack", post(acknowledge_nudge))
        .route("/:date", get(list_signals))
        .with_state(handlers)
}
