//! User HTTP Routes
//!
//! Save (upsert by id) and single-field update of user records.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Json, Path, State},
    routing::post,
    Router,
};
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use super::response::{reject, ErrorReply, MessageResponse};
use crate::observability::Event;
use crate::users::service::parse_user_id;
use crate::users::{SaveUserRequest, UserError, UserResult, UserService, UserUpdate};

/// Shared user state
pub struct UserState {
    pub service: UserService,
}

impl UserState {
    pub fn new(service: UserService) -> Self {
        Self { service }
    }
}

/// User routes with shared state
pub fn user_routes(state: Arc<UserState>) -> Router {
    Router::new()
        .route("/save-user", post(save_user_handler))
        .route("/update-user/:id", post(update_user_handler))
        .with_state(state)
}

// ==================
// Request/Response Types
// ==================

pub const USER_SAVED_MESSAGE: &str = "User saved successfully";
pub const USER_UPDATED_MESSAGE: &str = "User updated successfully";

#[derive(Debug, Serialize)]
pub struct UpdateUserResponse {
    pub message: String,
    pub user: Value,
}

fn user_error(e: UserError) -> ErrorReply {
    if matches!(e, UserError::UnsupportedUpdate(_)) {
        warn!(event = Event::UserRejected.as_str(), error = %e, "user request rejected");
    }
    reject(e.status_code(), e)
}

fn json_body(body: Result<Json<Value>, JsonRejection>) -> UserResult<Value> {
    body.map(|Json(value)| value)
        .map_err(|rejection| UserError::UnsupportedUpdate(rejection.body_text()))
}

// ==================
// Handlers
// ==================

/// Save user handler
///
/// Always succeeds. An unreadable body saves a record with no fields.
async fn save_user_handler(
    State(state): State<Arc<UserState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Json<MessageResponse> {
    let request = body
        .map(|Json(value)| SaveUserRequest::from_body(&value))
        .unwrap_or_default();

    state.service.save(request);
    Json(MessageResponse::new(USER_SAVED_MESSAGE))
}

/// Update user handler
///
/// An unknown id is reported before the body is looked at, so a missing
/// user is a 404 whatever the body holds.
async fn update_user_handler(
    State(state): State<Arc<UserState>>,
    Path(raw_id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<UpdateUserResponse>, ErrorReply> {
    let id = parse_user_id(&raw_id).map_err(user_error)?;
    state.service.ensure_exists(id).map_err(user_error)?;

    let update = json_body(body)
        .and_then(UserUpdate::from_body)
        .map_err(user_error)?;

    let user = state.service.update(id, update).map_err(user_error)?;
    Ok(Json(UpdateUserResponse {
        message: USER_UPDATED_MESSAGE.to_string(),
        user,
    }))
}
