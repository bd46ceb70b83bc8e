//! HTTP handlers for check-in, drift and nudge endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::dto::{CheckInRequest, DriftRequest};
use crate::adapters::http::error::{bad_request, domain_error_response};
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::request::{parse_date, request_metadata};
use crate::application::handlers::{
    AcknowledgeNudgeCommand, AcknowledgeNudgeHandler, ListSignalsHandler, ListSignalsQuery,
    RecordCheckInHandler, ReportDriftHandler,
};
use crate::domain::foundation::NudgeId;

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct SignalHandlers {
    check_in_handler: Arc<RecordCheckInHandler>,
    drift_handler: Arc<ReportDriftHandler>,
    acknowledge_handler: Arc<AcknowledgeNudgeHandler>,
    list_handler: Arc<ListSignalsHandler>,
}

impl SignalHandlers {
    pub fn new(
        check_in_handler: Arc<RecordCheckInHandler>,
        drift_handler: Arc<ReportDriftHandler>,
        acknowledge_handler: Arc<AcknowledgeNudgeHandler>,
        list_handler: Arc<ListSignalsHandler>,
    ) -> Self {
        Self {
            check_in_handler,
            drift_handler,
            acknowledge_handler,
            list_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/signals/check-ins - Record mood, energy and focus
pub async fn record_check_in(
    State(handlers): State<SignalHandlers>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<CheckInRequest>,
) -> Response {
    match handlers
        .check_in_handler
        .handle(req.into(), request_metadata(user.id))
        .await
    {
        Ok(check_in) => (StatusCode::CREATED, Json(check_in)).into_response(),
        Err(e) => domain_error_response(e),
    }
}

/// POST /api/signals/drift - Report a drift; may answer with a nudge
pub async fn report_drift(
    State(handlers): State<SignalHandlers>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<DriftRequest>,
) -> Response {
    match handlers
        .drift_handler
        .handle(req.into(), request_metadata(user.id))
        .await
    {
        Ok(result) => (StatusCode::CREATED, Json(result)).into_response(),
        Err(e) => domain_error_response(e),
    }
}

/// POST /api/signals/nudges/:id/ack - Acknowledge a nudge
pub async fn acknowledge_nudge(
    State(handlers): State<SignalHandlers>,
    RequireAuth(user): RequireAuth,
    Path(nudge_id): Path<String>,
) -> Response {
    let Ok(nudge_id) = nudge_id.parse::<NudgeId>() else {
        return bad_request(format!("Invalid nudge id '{}'", nudge_id));
    };

    match handlers
        .acknowledge_handler
        .handle(AcknowledgeNudgeCommand { nudge_id }, request_metadata(user.id))
        .await
    {
        Ok(nudge) => (StatusCode::OK, Json(nudge)).into_response(),
        Err(e) => domain_error_response(e),
    }
}

/// GET /api/signals/:date - Check-ins, drifts and nudges of a local day
pub async fn list_signals(
    State(handlers): State<SignalHandlers>,
    RequireAuth(user): RequireAuth,
    Path(date): Path<String>,
) -> Response {
    let date = match parse_date(&date) {
        Ok(date) => date,
        Err(response) => return response,
    };

    match handlers.list_handler.handle(ListSignalsQuery { date }, &user.id).await {
        Ok(signals) => (StatusCode::OK, Json(signals)).into_response(),
        Err(e) => domain_error_response(e),
    }
}
