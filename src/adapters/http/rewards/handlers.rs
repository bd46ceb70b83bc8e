//! HTTP handlers for weekly score, badge and insight endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::dto::{BadgeResponse, WeeklyScoreResponse};
use crate::adapters::http::error::domain_error_response;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::request::{parse_date, request_metadata};
use crate::application::handlers::{
    ComputeWeeklyScoreHandler, ComputeWeeklyScoreQuery, GetDailyInsightsHandler,
    GetDailyInsightsQuery, ListBadgesHandler,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct RewardHandlers {
    weekly_score_handler: Arc<ComputeWeeklyScoreHandler>,
    badges_handler: Arc<ListBadgesHandler>,
    insights_handler: Arc<GetDailyInsightsHandler>,
}

impl RewardHandlers {
    pub fn new(
        weekly_score_handler: Arc<ComputeWeeklyScoreHandler>,
        badges_handler: Arc<ListBadgesHandler>,
        insights_handler: Arc<GetDailyInsightsHandler>,
    ) -> Self {
        Self {
            weekly_score_handler,
            badges_handler,
            insights_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/rewards/weekly/:date - Omni Score for the week containing `date`
pub async fn weekly_score(
    State(handlers): State<RewardHandlers>,
    RequireAuth(user): RequireAuth,
    Path(date): Path<String>,
) -> Response {
    let date = match parse_date(&date) {
        Ok(date) => date,
        Err(response) => return response,
    };

    match handlers
        .weekly_score_handler
        .handle(ComputeWeeklyScoreQuery { date }, request_metadata(user.id))
        .await
    {
        Ok(report) => (StatusCode::OK, Json(WeeklyScoreResponse::from(report))).into_response(),
        Err(e) => domain_error_response(e),
    }
}

/// GET /api/rewards/badges - Every badge the caller has unlocked
pub async fn list_badges(
    State(handlers): State<RewardHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    match handlers.badges_handler.handle(&user.id).await {
        Ok(badges) => {
            let body: Vec<BadgeResponse> = badges.into_iter().map(BadgeResponse::from).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => domain_error_response(e),
    }
}

/// GET /api/insights/:date - Drift, focus and burnout analysis of a day
pub async fn daily_insights(
    State(handlers): State<RewardHandlers>,
    RequireAuth(user): RequireAuth,
    Path(date): Path<String>,
) -> Response {
    let date = match parse_date(&date) {
        Ok(date) => date,
        Err(response) => return response,
    };

    match handlers
        .insights_handler
        .handle(GetDailyInsightsQuery { date }, &user.id)
        .await
    {
        Ok(insights) => (StatusCode::OK, Json(insights)).into_response(),
        Err(e) => domain_error_response(e),
    }
}
