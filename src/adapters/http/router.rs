//! Top-level API router.
//!
//! ```text
//! /health              liveness, no auth
//! /api/profile         profile
//! /api/plans           daily plans
//! /api/signals         check-ins, drift, nudges
//! /api/rewards         weekly score, badges
//! /api/insights        daily insights
//! /api/sync/google     calendar connection and sync
//! ```

use axum::{
    http::{HeaderValue, StatusCode},
    middleware,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use super::middleware::{auth_middleware, AuthState};
use super::plans::{plan_routes, PlanHandlers};
use super::profile::{profile_routes, ProfileHandlers};
use super::rewards::{insight_routes, reward_routes, RewardHandlers};
use super::signals::{signal_routes, SignalHandlers};
use super::sync::{sync_routes, SyncHandlers};
use crate::config::ServerConfig;

/// Handler state for every endpoint module.
#[derive(Clone)]
pub struct ApiHandlers {
    pub profile: ProfileHandlers,
    pub plans: PlanHandlers,
    pub signals: SignalHandlers,
    pub rewards: RewardHandlers,
    pub sync: SyncHandlers,
}

/// Builds the application router with auth, CORS, timeout and tracing layers.
pub fn api_router(handlers: ApiHandlers, validator: AuthState, server: &ServerConfig) -> Router {
    let api = Router::new()
        .nest("/profile", profile_routes(handlers.profile))
        .nest("/plans", plan_routes(handlers.plans))
        .nest("/signals", signal_routes(handlers.signals))
        .nest("/rewards", reward_routes(handlers.rewards.clone()))
        .nest("/insights", insight_routes(handlers.rewards))
        .nest("/sync/google", sync_routes(handlers.sync))
        .layer(middleware::from_fn_with_state(validator, auth_middleware));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(cors_layer(&server.cors_origins_list()))
        .layer(TraceLayer::new_for_http())
}

async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "ok",
            "version": env!("CARGO_PKG_VERSION"),
        })),
    )
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring malformed CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(allowed))
}
