//! Auth HTTP Routes
//!
//! Login, OTP verification and the attempt log listings.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Json, State},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use serde_json::Value;

use super::response::{reject, ErrorReply, MessageResponse};
use crate::auth::{AuthService, LoginRequest, VerifyRequest};

/// Shared auth state
pub struct AuthState {
    pub service: AuthService,
}

impl AuthState {
    pub fn new(service: AuthService) -> Self {
        Self { service }
    }
}

/// Auth routes with shared state
pub fn auth_routes(state: Arc<AuthState>) -> Router {
    Router::new()
        .route("/login", post(login_handler))
        .route("/verify", post(verify_handler))
        .route("/users", get(list_login_attempts_handler))
        .route("/otp-attempts", get(list_otp_attempts_handler))
        .with_state(state)
}

// ==================
// Request/Response Types
// ==================

pub const LOGIN_ACCEPTED_MESSAGE: &str = "Login successful. Verification required.";
pub const OTP_ACCEPTED_MESSAGE: &str = "OTP Received Successfully!";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub message: String,
    pub verification_code: String,
}

/// Decode a body leniently: anything unreadable counts as an empty body
fn lenient<T>(body: Result<Json<Value>, JsonRejection>) -> T
where
    T: serde::de::DeserializeOwned + Default,
{
    body.ok()
        .and_then(|Json(value)| serde_json::from_value(value).ok())
        .unwrap_or_default()
}

// ==================
// Handlers
// ==================

/// Login handler
async fn login_handler(
    State(state): State<Arc<AuthState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<LoginResponse>, ErrorReply> {
    let request = body
        .map(|Json(value)| LoginRequest::from_body(&value))
        .unwrap_or_default();

    match state.service.login(request) {
        Ok(code) => Ok(Json(LoginResponse {
            message: LOGIN_ACCEPTED_MESSAGE.to_string(),
            verification_code: code,
        })),
        Err(e) => Err(reject(e.status_code(), e)),
    }
}

/// OTP verification handler
async fn verify_handler(
    State(state): State<Arc<AuthState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<MessageResponse>, ErrorReply> {
    let request: VerifyRequest = lenient(body);

    match state.service.verify(request) {
        Ok(()) => Ok(Json(MessageResponse::new(OTP_ACCEPTED_MESSAGE))),
        Err(e) => Err(reject(e.status_code(), e)),
    }
}

/// Full login attempts log
async fn list_login_attempts_handler(State(state): State<Arc<AuthState>>) -> Json<Vec<Value>> {
    Json(state.service.attempts())
}

/// Same log as `/users`; OTP entries are not filtered out
async fn list_otp_attempts_handler(State(state): State<Arc<AuthState>>) -> Json<Vec<Value>> {
    Json(state.service.attempts())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_login_response_serialization() {
        let response = LoginResponse {
            message: LOGIN_ACCEPTED_MESSAGE.to_string(),
            verification_code: "123456".to_string(),
        };

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["verificationCode"], "123456");
        assert_eq!(value["message"], LOGIN_ACCEPTED_MESSAGE);
    }

    #[test]
    fn test_lenient_decoding() {
        let request: VerifyRequest = lenient(Ok(Json(json!({"code": "123456"}))));
        assert_eq!(request.code, Some(json!("123456")));

        let request: VerifyRequest = lenient(Ok(Json(json!("not an object"))));
        assert!(request.code.is_none());
    }
}
