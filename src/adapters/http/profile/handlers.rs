//! HTTP handlers for profile endpoints.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::dto::{CreateProfileRequest, ProfileResponse, UpdateProfileRequest};
use crate::adapters::http::error::domain_error_response;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::request::request_metadata;
use crate::application::handlers::{
    CreateProfileCommand, CreateProfileHandler, DeleteProfileHandler, GetProfileHandler,
    UpdateProfileCommand, UpdateProfileHandler,
};
use crate::domain::foundation::DomainError;

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct ProfileHandlers {
    create_handler: Arc<CreateProfileHandler>,
    get_handler: Arc<GetProfileHandler>,
    update_handler: Arc<UpdateProfileHandler>,
    delete_handler: Arc<DeleteProfileHandler>,
}

impl ProfileHandlers {
    pub fn new(
        create_handler: Arc<CreateProfileHandler>,
        get_handler: Arc<GetProfileHandler>,
        update_handler: Arc<UpdateProfileHandler>,
        delete_handler: Arc<DeleteProfileHandler>,
    ) -> Self {
        Self {
            create_handler,
            get_handler,
            update_handler,
            delete_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/profile - Create the caller's profile
pub async fn create_profile(
    State(handlers): State<ProfileHandlers>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<CreateProfileRequest>,
) -> Response {
    let settings = match req.settings.into_patch(None) {
        Ok(patch) => patch,
        Err(e) => return domain_error_response(DomainError::from(e)),
    };
    let cmd = CreateProfileCommand {
        display_name: req.display_name,
        settings,
    };

    match handlers
        .create_handler
        .handle(cmd, request_metadata(user.id))
        .await
    {
        Ok(profile) => {
            (StatusCode::CREATED, Json(ProfileResponse::from(&profile))).into_response()
        }
        Err(e) => domain_error_response(e),
    }
}

/// GET /api/profile - Get the caller's profile
pub async fn get_profile(
    State(handlers): State<ProfileHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    match handlers.get_handler.handle(&user.id).await {
        Ok(profile) => (StatusCode::OK, Json(ProfileResponse::from(&profile))).into_response(),
        Err(e) => domain_error_response(e),
    }
}

/// PATCH /api/profile - Update preferences
pub async fn update_profile(
    State(handlers): State<ProfileHandlers>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<UpdateProfileRequest>,
) -> Response {
    let patch = match req.settings.into_patch(req.display_name) {
        Ok(patch) => patch,
        Err(e) => return domain_error_response(DomainError::from(e)),
    };

    match handlers
        .update_handler
        .handle(UpdateProfileCommand { patch }, request_metadata(user.id))
        .await
    {
        Ok(profile) => (StatusCode::OK, Json(ProfileResponse::from(&profile))).into_response(),
        Err(e) => domain_error_response(e),
    }
}

/// DELETE /api/profile - Delete the profile and its calendar connection
pub async fn delete_profile(
    State(handlers): State<ProfileHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    match handlers.delete_handler.handle(request_metadata(user.id)).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => domain_error_response(e),
    }
}
