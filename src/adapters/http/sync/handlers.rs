//! HTTP handlers for Google Calendar and Tasks sync.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::dto::{ConnectRequest, ConnectionResponse};
use crate::adapters::http::error::domain_error_response;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::request::{parse_date, request_metadata};
use crate::application::handlers::{
    ConnectCalendarCommand, ConnectCalendarHandler, DisconnectCalendarHandler, SyncDayHandler,
    SyncDayQuery,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct SyncHandlers {
    connect_handler: Arc<ConnectCalendarHandler>,
    disconnect_handler: Arc<DisconnectCalendarHandler>,
    sync_handler: Arc<SyncDayHandler>,
}

impl SyncHandlers {
    pub fn new(
        connect_handler: Arc<ConnectCalendarHandler>,
        disconnect_handler: Arc<DisconnectCalendarHandler>,
        sync_handler: Arc<SyncDayHandler>,
    ) -> Self {
        Self {
            connect_handler,
            disconnect_handler,
            sync_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/sync/google/connect - Exchange an OAuth code and store the tokens
pub async fn connect(
    State(handlers): State<SyncHandlers>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<ConnectRequest>,
) -> Response {
    match handlers
        .connect_handler
        .handle(ConnectCalendarCommand { code: req.code }, request_metadata(user.id))
        .await
    {
        Ok(connection) => {
            (StatusCode::CREATED, Json(ConnectionResponse::from(&connection))).into_response()
        }
        Err(e) => domain_error_response(e),
    }
}

/// DELETE /api/sync/google - Forget the stored tokens
pub async fn disconnect(
    State(handlers): State<SyncHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    match handlers.disconnect_handler.handle(request_metadata(user.id)).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => domain_error_response(e),
    }
}

/// POST /api/sync/google/:date - Pull events and open tasks for a local day
pub async fn sync_day(
    State(handlers): State<SyncHandlers>,
    RequireAuth(user): RequireAuth,
    Path(date): Path<String>,
) -> Response {
    let date = match parse_date(&date) {
        Ok(date) => date,
        Err(response) => return response,
    };

    match handlers
        .sync_handler
        .handle(SyncDayQuery { date }, request_metadata(user.id))
        .await
    {
        Ok(snapshot) => (StatusCode::OK, Json(snapshot)).into_response(),
        Err(e) => domain_error_response(e),
    }
}
