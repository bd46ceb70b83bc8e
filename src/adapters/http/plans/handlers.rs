//! HTTP handlers for daily plan endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::dto::{PlanResponse, UpdateBlockStatusRequest};
use crate::adapters::http::error::{bad_request, domain_error_response};
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::request::{parse_date, request_metadata};
use crate::application::handlers::{
    GeneratePlanCommand, GeneratePlanHandler, GetPlanHandler, GetPlanQuery,
    UpdateBlockStatusCommand, UpdateBlockStatusHandler,
};
use crate::domain::foundation::BlockId;

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct PlanHandlers {
    generate_handler: Arc<GeneratePlanHandler>,
    get_handler: Arc<GetPlanHandler>,
    update_block_handler: Arc<UpdateBlockStatusHandler>,
}

impl PlanHandlers {
    pub fn new(
        generate_handler: Arc<GeneratePlanHandler>,
        get_handler: Arc<GetPlanHandler>,
        update_block_handler: Arc<UpdateBlockStatusHandler>,
    ) -> Self {
        Self {
            generate_handler,
            get_handler,
            update_block_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/plans/:date/generate - Build (or rebuild) the day's plan
pub async fn generate_plan(
    State(handlers): State<PlanHandlers>,
    RequireAuth(user): RequireAuth,
    Path(date): Path<String>,
) -> Response {
    let date = match parse_date(&date) {
        Ok(date) => date,
        Err(response) => return response,
    };

    match handlers
        .generate_handler
        .handle(GeneratePlanCommand { date }, request_metadata(user.id))
        .await
    {
        Ok(plan) => (StatusCode::CREATED, Json(PlanResponse::from(&plan))).into_response(),
        Err(e) => domain_error_response(e),
    }
}

/// GET /api/plans/:date - Stored plan for a day
pub async fn get_plan(
    State(handlers): State<PlanHandlers>,
    RequireAuth(user): RequireAuth,
    Path(date): Path<String>,
) -> Response {
    let date = match parse_date(&date) {
        Ok(date) => date,
        Err(response) => return response,
    };

    match handlers.get_handler.handle(GetPlanQuery { date }, &user.id).await {
        Ok(plan) => (StatusCode::OK, Json(PlanResponse::from(&plan))).into_response(),
        Err(e) => domain_error_response(e),
    }
}

/// PATCH /api/plans/:date/blocks/:block_id - Mark a block completed or skipped
pub async fn update_block_status(
    State(handlers): State<PlanHandlers>,
    RequireAuth(user): RequireAuth,
    Path((date, block_id)): Path<(String, String)>,
    Json(req): Json<UpdateBlockStatusRequest>,
) -> Response {
    let date = match parse_date(&date) {
        Ok(date) => date,
        Err(response) => return response,
    };
    let Ok(block_id) = block_id.parse::<BlockId>() else {
        return bad_request(format!("Invalid block id '{}'", block_id));
    };

    let cmd = UpdateBlockStatusCommand {
        date,
        block_id,
        status: req.status,
    };

    match handlers
        .update_block_handler
        .handle(cmd, request_metadata(user.id))
        .await
    {
        Ok(plan) => (StatusCode::OK, Json(PlanResponse::from(&plan))).into_response(),
        Err(e) => domain_error_response(e),
    }
}
