//! # User Errors

use thiserror::Error;

/// Result type for user operations
pub type UserResult<T> = Result<T, UserError>;

/// User save and update errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserError {
    /// No record with the requested id
    #[error("User not found")]
    NotFound,

    /// Update names a field that cannot be changed, or a mistyped value
    #[error("Unsupported field update: {0}")]
    UnsupportedUpdate(String),
}

impl UserError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            UserError::NotFound => 404,
            UserError::UnsupportedUpdate(_) => 400,
        }
    }
}
