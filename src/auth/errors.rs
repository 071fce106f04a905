//! # Auth Errors

use thiserror::Error;

/// Result type for auth operations
pub type AuthResult<T> = Result<T, AuthError>;

/// Login and OTP verification errors
///
/// The display text is the `message` of the HTTP response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Email or password missing or empty
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Submitted code is not a 6 character string
    #[error("Invalid OTP format!")]
    InvalidOtpFormat,
}

impl AuthError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            AuthError::InvalidCredentials => 401,
            AuthError::InvalidOtpFormat => 400,
        }
    }
}
