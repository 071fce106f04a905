//! # otpdesk Auth Module
//!
//! Login submission and OTP verification. Both only record what was
//! submitted into the login attempts log; no credential is checked against
//! a user store.

pub mod attempts;
pub mod code;
pub mod errors;
pub mod service;

pub use attempts::{AttemptRecord, LoginAttempt, OtpAttempt, OtpStatus};
pub use errors::{AuthError, AuthResult};
pub use service::{AuthService, LoginRequest, VerifyRequest};
