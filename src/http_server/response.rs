//! Response bodies shared by the routers

use std::fmt::Display;

use axum::{http::StatusCode, Json};
use serde::Serialize;

/// `{message}` body used by every non-listing endpoint
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Error half of a handler result
pub type ErrorReply = (StatusCode, Json<MessageResponse>);

/// Build an error reply from a status code and an error's display text
pub fn reject(status: u16, err: impl Display) -> ErrorReply {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(MessageResponse::new(err.to_string())))
}
