//! # Attempt Records
//!
//! Entries of the login attempts log. Login submissions and OTP
//! verifications share the same collection with different shapes.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Current time as an ISO-8601 UTC string with millisecond precision
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// A login submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginAttempt {
    /// Submitted email, absent when the request carried none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Submitted password in plaintext, `"failure"` for rejected logins
    pub password: String,

    /// Issued code, `null` for rejected logins
    pub verification_code: Option<String>,

    pub timestamp: String,
}

/// Password recorded for a rejected login
pub const FAILED_LOGIN_PASSWORD: &str = "failure";

impl LoginAttempt {
    /// Entry for accepted credentials
    pub fn accepted(email: &str, password: &str, code: &str) -> Self {
        Self {
            email: Some(email.to_string()),
            password: password.to_string(),
            verification_code: Some(code.to_string()),
            timestamp: timestamp_now(),
        }
    }

    /// Entry for rejected credentials
    pub fn rejected(email: Option<&str>) -> Self {
        Self {
            email: email.map(str::to_string),
            password: FAILED_LOGIN_PASSWORD.to_string(),
            verification_code: None,
            timestamp: timestamp_now(),
        }
    }
}

/// Outcome of an OTP format check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OtpStatus {
    Success,
    Failure,
}

/// An OTP verification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpAttempt {
    /// The submitted value as received
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub otp_code: Option<Value>,

    pub status: OtpStatus,

    pub timestamp: String,
}

impl OtpAttempt {
    pub fn new(otp_code: Option<Value>, status: OtpStatus) -> Self {
        Self {
            otp_code,
            status,
            timestamp: timestamp_now(),
        }
    }
}

/// Any entry of the login attempts log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttemptRecord {
    Login(LoginAttempt),
    Otp(OtpAttempt),
}

impl AttemptRecord {
    /// Encode for the record store
    pub fn to_value(&self) -> Value {
        // Plain structs of strings, cannot fail to serialize
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl From<LoginAttempt> for AttemptRecord {
    fn from(attempt: LoginAttempt) -> Self {
        AttemptRecord::Login(attempt)
    }
}

impl From<OtpAttempt> for AttemptRecord {
    fn from(attempt: OtpAttempt) -> Self {
        AttemptRecord::Otp(attempt)
    }
}
